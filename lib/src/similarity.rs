use anyhow::Result;

use crate::raw_data::{Location, RawQuestionData, CORRECT_ANSWERS};

pub const DEFAULT_THRESHOLD: f64 = 0.98;

/// Two retained questions whose question-plus-answers text is nearly the same
/// and whose correct answers are identical.
#[derive(Clone, Debug, PartialEq)]
pub struct NearDuplicate {
    pub similarity: f64,
    pub first: NearDuplicateSide,
    pub second: NearDuplicateSide,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NearDuplicateSide {
    pub question: String,
    pub answers: String,
    pub location: Location,
}

impl NearDuplicateSide {
    fn new(question: &RawQuestionData) -> Result<Self> {
        let key = question.key()?;

        Ok(Self {
            question: key.question_text(),
            answers: key.answers_text(),
            location: question.location(),
        })
    }
}

/// Ratcliff/Obershelp similarity: twice the number of matching characters
/// divided by the total length of both strings.
///
/// No character is ever treated as junk. Matchers that drop characters
/// occurring in more than 1% of a string of 200 or more characters give
/// lower scores on long texts than this does.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a = a.chars().collect::<Vec<_>>();
    let b = b.chars().collect::<Vec<_>>();

    ratio_of(&a, &b)
}

fn ratio_of(a: &[char], b: &[char]) -> f64 {
    let length = a.len() + b.len();

    if length == 0 {
        return 1.0;
    }

    2.0 * matching_characters(a, b) as f64 / length as f64
}

/// Upper bound of [`ratio`] that only looks at the lengths.
fn quick_ratio_bound(a: &[char], b: &[char]) -> f64 {
    let length = a.len() + b.len();

    if length == 0 {
        return 1.0;
    }

    2.0 * a.len().min(b.len()) as f64 / length as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_low, a_high, b_low, b_high)) = pending.pop() {
        let (i, j, size) = longest_match(&a[a_low..a_high], &b[b_low..b_high]);

        if size == 0 {
            continue;
        }

        let (i, j) = (a_low + i, b_low + j);
        total += size;

        if a_low < i && b_low < j {
            pending.push((a_low, i, b_low, j));
        }

        if i + size < a_high && j + size < b_high {
            pending.push((i + size, a_high, j + size, b_high));
        }
    }

    total
}

/// Longest common block as `(start in a, start in b, length)`. Ties go to the
/// block that ends first in `a`, then first in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0; b.len() + 1];
    let mut current = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        for (j, b_char) in b.iter().enumerate() {
            current[j + 1] = if a_char == b_char { previous[j] + 1 } else { 0 };

            let size = current[j + 1];
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }

        std::mem::swap(&mut previous, &mut current);
    }

    best
}

/// Compares every pair of questions and returns the first pair above
/// `threshold` that also has the same correct answers.
pub fn find_near_duplicate(
    questions: &[RawQuestionData],
    threshold: f64,
) -> Result<Option<NearDuplicate>> {
    let texts = questions
        .iter()
        .map(|question| Ok(question.key()?.joined_text().chars().collect::<Vec<_>>()))
        .collect::<Result<Vec<_>>>()?;

    for (index, first) in questions.iter().enumerate() {
        if index % 100 == 0 {
            tracing::info!("comparing similar questions: {index}/{}", questions.len());
        }

        for (offset, second) in questions[index + 1..].iter().enumerate() {
            let other = index + 1 + offset;

            if quick_ratio_bound(&texts[index], &texts[other]) <= threshold {
                continue;
            }

            if first.get(CORRECT_ANSWERS) != second.get(CORRECT_ANSWERS) {
                continue;
            }

            let similarity = ratio_of(&texts[index], &texts[other]);

            if similarity > threshold {
                return Ok(Some(NearDuplicate {
                    similarity,
                    first: NearDuplicateSide::new(first)?,
                    second: NearDuplicateSide::new(second)?,
                }));
            }
        }
    }

    Ok(None)
}
