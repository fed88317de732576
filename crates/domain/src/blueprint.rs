use std::cmp::Ordering;

use derive_more::{AsRef, Display, Into};

use crate::ExerciseID;

/// Planned shape of one exercise within a workout. Expansion turns each
/// item into one log entry per day and set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueprintItem {
    pub exercise_id: ExerciseID,
    pub order: OrderToken,
    pub sets: Sets,
    pub target_reps: TargetReps,
    pub tempo: Tempo,
    pub rest: Rest,
    pub notes: String,
}

/// Position label like `A`, `B1` or `C2`. Tokens are compared naturally,
/// digit runs by numeric value, so `A2` sorts before `A10`.
#[derive(AsRef, Debug, Display, Clone, Hash, PartialEq, Eq)]
pub struct OrderToken(String);

impl OrderToken {
    pub fn new(token: &str) -> Result<Self, OrderTokenError> {
        let trimmed_token = token.trim();

        if trimmed_token.is_empty() {
            return Err(OrderTokenError::Empty);
        }

        let len = trimmed_token.len();

        if len > 8 {
            return Err(OrderTokenError::TooLong(len));
        }

        Ok(OrderToken(trimmed_token.to_string()))
    }
}

impl TryFrom<&str> for OrderToken {
    type Error = OrderTokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        OrderToken::new(value)
    }
}

impl Ord for OrderToken {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.0.as_str();
        let mut right = other.0.as_str();

        loop {
            match (next_chunk(&mut left), next_chunk(&mut right)) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => {
                    let ordering = a.cmp(&b);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }
}

impl PartialOrd for OrderToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(u64, &'a str),
    Text(&'a str),
}

impl Ord for Chunk<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Number(a, raw_a), Chunk::Number(b, raw_b)) => {
                a.cmp(b).then_with(|| raw_a.len().cmp(&raw_b.len()))
            }
            (Chunk::Number(..), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(..)) => Ordering::Greater,
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Chunk<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn next_chunk<'a>(value: &mut &'a str) -> Option<Chunk<'a>> {
    let first = value.chars().next()?;
    let is_digit = first.is_ascii_digit();
    let end = value
        .find(|c: char| c.is_ascii_digit() != is_digit)
        .unwrap_or(value.len());
    let (chunk, rest) = value.split_at(end);
    *value = rest;

    Some(if is_digit {
        // Tokens are at most 8 characters, the digit run always fits in u64.
        Chunk::Number(chunk.parse().unwrap_or(u64::MAX), chunk)
    } else {
        Chunk::Text(chunk)
    })
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OrderTokenError {
    #[error("Order must not be empty")]
    Empty,
    #[error("Order must be 8 characters or fewer ({0} > 8)")]
    TooLong(usize),
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..100).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 99")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(AsRef, Debug, Default, Display, Clone, PartialEq, Eq)]
pub struct TargetReps(String);

impl TargetReps {
    pub fn new(target_reps: &str) -> Result<Self, TargetRepsError> {
        let trimmed_target_reps = target_reps.trim();
        let len = trimmed_target_reps.len();

        if len > 16 {
            return Err(TargetRepsError::TooLong(len));
        }

        Ok(TargetReps(trimmed_target_reps.to_string()))
    }
}

impl TryFrom<&str> for TargetReps {
    type Error = TargetRepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        TargetReps::new(value)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TargetRepsError {
    #[error("Target reps must be 16 characters or fewer ({0} > 16)")]
    TooLong(usize),
}

#[derive(AsRef, Debug, Default, Display, Clone, PartialEq, Eq)]
pub struct Tempo(String);

impl Tempo {
    pub fn new(tempo: &str) -> Result<Self, TempoError> {
        let trimmed_tempo = tempo.trim();
        let len = trimmed_tempo.len();

        if len > 16 {
            return Err(TempoError::TooLong(len));
        }

        Ok(Tempo(trimmed_tempo.to_string()))
    }
}

impl TryFrom<&str> for Tempo {
    type Error = TempoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Tempo::new(value)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TempoError {
    #[error("Tempo must be 16 characters or fewer ({0} > 16)")]
    TooLong(usize),
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rest(u32);

impl Rest {
    pub fn new(value: u32) -> Result<Self, RestError> {
        if !(0..1000).contains(&value) {
            return Err(RestError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Rest {
    type Error = RestError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Rest::new(parsed_value),
            Err(_) => Err(RestError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestError {
    #[error("Rest must be in the range 0 to 999 s")]
    OutOfRange,
    #[error("Rest must be an integer")]
    ParseError,
}
