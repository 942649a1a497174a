//! Protected operations and the permission each one requires.
//!
//! Handlers look up their requirement here with a plain function call; the
//! table is the single place where routes meet permission strings.


use crate::Permission;
use crate::permissions::{
    DELETE_ACTORS, DELETE_MOVIES, GET_ACTORS, GET_MOVIES, PATCH_MOVIES, POST_ACTORS, POST_MOVIES,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    ListActors,
    GetActor,
    CreateActor,
    DeleteActor,
    ListMovies,
    GetMovie,
    CreateMovie,
    UpdateMovie,
    DeleteMovie,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::ListActors,
        Operation::GetActor,
        Operation::CreateActor,
        Operation::DeleteActor,
        Operation::ListMovies,
        Operation::GetMovie,
        Operation::CreateMovie,
        Operation::UpdateMovie,
        Operation::DeleteMovie,
    ];

    /// The exact permission a caller must hold to perform this operation.
    pub fn required_permission(self) -> Permission {
        match self {
            Operation::ListActors | Operation::GetActor => GET_ACTORS,
            Operation::CreateActor => POST_ACTORS,
            Operation::DeleteActor => DELETE_ACTORS,
            Operation::ListMovies | Operation::GetMovie => GET_MOVIES,
            Operation::CreateMovie => POST_MOVIES,
            Operation::UpdateMovie => PATCH_MOVIES,
            Operation::DeleteMovie => DELETE_MOVIES,
        }
    }

    /// HTTP method and route template serving this operation.
    pub fn route(self) -> (&'static str, &'static str) {
        match self {
            Operation::ListActors => ("GET", "/actors"),
            Operation::GetActor => ("GET", "/actors/{id}"),
            Operation::CreateActor => ("POST", "/actors"),
            Operation::DeleteActor => ("DELETE", "/actors/{id}"),
            Operation::ListMovies => ("GET", "/movies"),
            Operation::GetMovie => ("GET", "/movies/{id}"),
            Operation::CreateMovie => ("POST", "/movies"),
            Operation::UpdateMovie => ("PATCH", "/movies/{id}"),
            Operation::DeleteMovie => ("DELETE", "/movies/{id}"),
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (method, route) = self.route();
        write!(f, "{method} {route}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_routes() {
        let table: Vec<(String, String)> = Operation::ALL
            .iter()
            .map(|op| (op.to_string(), op.required_permission().to_string()))
            .collect();

        let expected = [
            ("GET /actors", "get:actors"),
            ("GET /actors/{id}", "get:actors"),
            ("POST /actors", "post:actors"),
            ("DELETE /actors/{id}", "delete:actors"),
            ("GET /movies", "get:movies"),
            ("GET /movies/{id}", "get:movies"),
            ("POST /movies", "post:movies"),
            ("PATCH /movies/{id}", "patch:movies"),
            ("DELETE /movies/{id}", "delete:movies"),
        ];
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(route, perm)| (route.to_string(), perm.to_string()))
            .collect();

        assert_eq!(table, expected);
    }

    #[test]
    fn every_permission_is_scoped_to_its_resource() {
        for op in Operation::ALL {
            let (_, route) = op.route();
            let perm = op.required_permission();
            let resource = perm.as_str().split(':').nth(1).unwrap();
            assert!(route.starts_with(&format!("/{resource}")), "{op} -> {perm}");
        }
    }
}
