use serde::Deserialize;

use casting_catalog::{MoviePatch, NewActor, NewMovie};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub name: String,
    pub age: u32,
    pub gender: String,
}

impl From<CreateActorRequest> for NewActor {
    fn from(body: CreateActorRequest) -> Self {
        NewActor {
            name: body.name,
            age: body.age,
            gender: body.gender,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub duration: u32,
    pub release_year: i32,
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(body: CreateMovieRequest) -> Self {
        NewMovie {
            title: body.title,
            duration: body.duration,
            release_year: body.release_year,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub release_year: Option<i32>,
}

impl From<UpdateMovieRequest> for MoviePatch {
    fn from(body: UpdateMovieRequest) -> Self {
        MoviePatch {
            title: body.title,
            duration: body.duration,
            release_year: body.release_year,
        }
    }
}
