use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use casting_core::{ActorId, DomainError, DomainResult, MovieId};

use crate::{Actor, Movie, MoviePatch, NewActor, NewMovie};

#[derive(Debug)]
struct CatalogState {
    actors: BTreeMap<ActorId, Actor>,
    movies: BTreeMap<MovieId, Movie>,
    next_actor: ActorId,
    next_movie: MovieId,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            actors: BTreeMap::new(),
            movies: BTreeMap::new(),
            next_actor: ActorId::new(1),
            next_movie: MovieId::new(1),
        }
    }
}

/// In-memory actor/movie catalog.
///
/// Identifiers are assigned sequentially per resource and never reused, even
/// after a delete. Listings are ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_actors(&self) -> Vec<Actor> {
        self.read().actors.values().cloned().collect()
    }

    pub fn get_actor(&self, id: ActorId) -> DomainResult<Actor> {
        self.read()
            .actors
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    pub fn create_actor(&self, new: NewActor) -> DomainResult<Actor> {
        let new = new.validate()?;
        let mut state = self.write();
        let id = state.next_actor;
        state.next_actor = id.next();

        let actor = Actor::from_new(id, new);
        state.actors.insert(id, actor.clone());
        Ok(actor)
    }

    pub fn delete_actor(&self, id: ActorId) -> DomainResult<ActorId> {
        self.write()
            .actors
            .remove(&id)
            .map(|_| id)
            .ok_or(DomainError::NotFound)
    }

    pub fn list_movies(&self) -> Vec<Movie> {
        self.read().movies.values().cloned().collect()
    }

    pub fn get_movie(&self, id: MovieId) -> DomainResult<Movie> {
        self.read()
            .movies
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    pub fn create_movie(&self, new: NewMovie) -> DomainResult<Movie> {
        let new = new.validate()?;
        let mut state = self.write();
        let id = state.next_movie;
        state.next_movie = id.next();

        let movie = Movie::from_new(id, new);
        state.movies.insert(id, movie.clone());
        Ok(movie)
    }

    /// Apply a partial update. Nothing changes unless the whole patch is valid.
    pub fn update_movie(&self, id: MovieId, patch: MoviePatch) -> DomainResult<Movie> {
        let patch = patch.validate()?;
        let mut state = self.write();
        let movie = state.movies.get_mut(&id).ok_or(DomainError::NotFound)?;
        movie.apply(patch);
        Ok(movie.clone())
    }

    pub fn delete_movie(&self, id: MovieId) -> DomainResult<MovieId> {
        self.write()
            .movies
            .remove(&id)
            .map(|_| id)
            .ok_or(DomainError::NotFound)
    }
}
