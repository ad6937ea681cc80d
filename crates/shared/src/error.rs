use time::Date;

use crate::mealplan::SlotKey;
use crate::recipe::RecipeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid meal type `{0}`, expected breakfast, lunch or dinner")]
    InvalidMealType(String),

    #[error("invalid slot id `{0}`, expected YYYY-MM-DD|meal")]
    InvalidSlotId(String),

    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: Date, end: Date },

    #[error("slot {0} appears more than once")]
    DuplicateSlot(SlotKey),

    #[error("slot {0} is outside the plan range")]
    OutOfRange(SlotKey),

    #[error("slot {0} not found")]
    SlotNotFound(SlotKey),

    #[error("recipe {0} not found")]
    RecipeNotFound(RecipeId),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Validation(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Validation(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Validation(format!($fmt, $($arg)*)))
    };
}

/// Fails with [`Error::InvalidRange`] when `start` is after `end`.
pub fn ensure_range(start: Date, end: Date) -> Result<()> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }

    Ok(())
}
