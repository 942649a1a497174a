use serde::Serialize;

use casting_core::{ActorId, DomainError, DomainResult, Entity};

const MAX_AGE: u32 = 150;

/// Actor as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    id: ActorId,
    name: String,
    age: u32,
    gender: String,
}

impl Actor {
    pub(crate) fn from_new(id: ActorId, new: NewActor) -> Self {
        Self {
            id,
            name: new.name,
            age: new.age,
            gender: new.gender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }
}

impl Entity for Actor {
    type Id = ActorId;

    fn id(&self) -> ActorId {
        self.id
    }
}

/// Input for creating an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub name: String,
    pub age: u32,
    pub gender: String,
}

impl NewActor {
    /// Trim text fields and enforce the actor invariants.
    pub fn validate(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        if self.age == 0 || self.age > MAX_AGE {
            return Err(DomainError::validation(format!(
                "age must be between 1 and {MAX_AGE}"
            )));
        }
        let gender = self.gender.trim().to_string();
        if gender.is_empty() {
            return Err(DomainError::validation("gender must not be empty"));
        }

        Ok(Self {
            name,
            age: self.age,
            gender,
        })
    }
}
