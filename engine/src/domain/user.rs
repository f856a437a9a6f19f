//! User identity and profile data models.
//!
//! Profiles are owned by an external user directory; the engine only reads
//! the fields the recommendation filter and leaderboard payloads need.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable numeric user identifier assigned by the external user directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a directory-assigned identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the underlying numeric id.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Profile sex, also the value space of the dating preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Stable lowercase name used in directory queries and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only profile attributes consumed by the recommendation filter.
///
/// The dating window is expressed in ages; [`UserProfile::birth_year_window`]
/// converts it into the exclusive birth-year band the candidate filter uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub sex: Sex,
    /// Sex this user wants to be recommended.
    pub dating_sex: Sex,
    pub location: String,
    pub birth_year: i32,
    /// Youngest acceptable candidate age.
    pub min_dating_age: i32,
    /// Oldest acceptable candidate age.
    pub max_dating_age: i32,
}

/// Exclusive birth-year band derived from a profile's dating ages.
///
/// Candidates must satisfy `after < birth_year < before`; both endpoints are
/// excluded, so an age sitting exactly on a boundary year never qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearWindow {
    /// Exclusive lower bound (candidates must be born after this year).
    pub after: i32,
    /// Exclusive upper bound (candidates must be born before this year).
    pub before: i32,
}

impl BirthYearWindow {
    /// Whether `birth_year` falls strictly inside the window.
    pub const fn contains(self, birth_year: i32) -> bool {
        self.after < birth_year && birth_year < self.before
    }
}

impl UserProfile {
    /// Derive the exclusive birth-year band for `current_year`.
    ///
    /// An inverted dating window (min age above max age) yields an empty
    /// band rather than an error; the directory owns profile validation.
    pub const fn birth_year_window(&self, current_year: i32) -> BirthYearWindow {
        BirthYearWindow {
            after: current_year - self.max_dating_age,
            before: current_year - self.min_dating_age,
        }
    }
}

/// Validation errors returned by [`UserSummary::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSummaryValidationError {
    EmptyNickname,
    NicknameTooLong { max: usize },
    NicknameInvalidCharacters,
}

impl fmt::Display for UserSummaryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNickname => write!(f, "nickname must not be empty"),
            Self::NicknameTooLong { max } => {
                write!(f, "nickname must be at most {max} characters")
            }
            Self::NicknameInvalidCharacters => write!(
                f,
                "nickname may only contain letters, numbers, spaces, or underscores",
            ),
        }
    }
}

impl std::error::Error for UserSummaryValidationError {}

const NICKNAME_MAX_CHARS: usize = 30;

fn nickname_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{N} _]+$").unwrap_or_else(|err| {
            panic!("nickname pattern must compile: {err}");
        })
    })
}

/// Public profile summary attached to leaderboard entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: UserId,
    pub nickname: String,
    pub sex: Sex,
    pub birth_year: i32,
    pub location: String,
}

impl UserSummary {
    /// Build a summary after validating the nickname.
    pub fn try_new(
        user_id: UserId,
        nickname: impl Into<String>,
        sex: Sex,
        birth_year: i32,
        location: impl Into<String>,
    ) -> Result<Self, UserSummaryValidationError> {
        let nickname = nickname.into();
        if nickname.trim().is_empty() {
            return Err(UserSummaryValidationError::EmptyNickname);
        }
        if nickname.chars().count() > NICKNAME_MAX_CHARS {
            return Err(UserSummaryValidationError::NicknameTooLong {
                max: NICKNAME_MAX_CHARS,
            });
        }
        if !nickname_pattern().is_match(&nickname) {
            return Err(UserSummaryValidationError::NicknameInvalidCharacters);
        }
        Ok(Self {
            user_id,
            nickname,
            sex,
            birth_year,
            location: location.into(),
        })
    }
}
