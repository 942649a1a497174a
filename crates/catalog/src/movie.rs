use serde::Serialize;

use casting_core::{DomainError, DomainResult, Entity, MovieId};

/// First year a motion picture could have been released.
const FIRST_RELEASE_YEAR: i32 = 1888;
const LAST_RELEASE_YEAR: i32 = 2100;

/// Movie as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    id: MovieId,
    title: String,
    duration: u32,
    release_year: i32,
}

impl Movie {
    pub(crate) fn from_new(id: MovieId, new: NewMovie) -> Self {
        Self {
            id,
            title: new.title,
            duration: new.duration,
            release_year: new.release_year,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Running time in hours.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn release_year(&self) -> i32 {
        self.release_year
    }

    /// Apply an already-validated patch.
    pub(crate) fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(release_year) = patch.release_year {
            self.release_year = release_year;
        }
    }
}

impl Entity for Movie {
    type Id = MovieId;

    fn id(&self) -> MovieId {
        self.id
    }
}

/// Input for creating a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub duration: u32,
    pub release_year: i32,
}

impl NewMovie {
    pub fn validate(self) -> DomainResult<Self> {
        Ok(Self {
            title: validate_title(&self.title)?,
            duration: validate_duration(self.duration)?,
            release_year: validate_release_year(self.release_year)?,
        })
    }
}

/// Partial update of a movie; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub release_year: Option<i32>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.duration.is_none() && self.release_year.is_none()
    }

    pub fn validate(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("patch must change at least one field"));
        }

        Ok(Self {
            title: self.title.as_deref().map(validate_title).transpose()?,
            duration: self.duration.map(validate_duration).transpose()?,
            release_year: self.release_year.map(validate_release_year).transpose()?,
        })
    }
}

fn validate_title(title: &str) -> DomainResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("title must not be empty"));
    }
    Ok(title.to_string())
}

fn validate_duration(duration: u32) -> DomainResult<u32> {
    if duration == 0 {
        return Err(DomainError::validation("duration must be positive"));
    }
    Ok(duration)
}

fn validate_release_year(year: i32) -> DomainResult<i32> {
    if !(FIRST_RELEASE_YEAR..=LAST_RELEASE_YEAR).contains(&year) {
        return Err(DomainError::validation(format!(
            "release_year must be between {FIRST_RELEASE_YEAR} and {LAST_RELEASE_YEAR}"
        )));
    }
    Ok(year)
}
