use const_format::concatcp;

use crate::api::API_BASE_PATH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Users,
    UserExercises,
    UserLogs,
    Ping,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Users => concatcp!(API_BASE_PATH, "users"),
            UserExercises => concatcp!(API_BASE_PATH, "users/:id/exercises"),
            UserLogs => concatcp!(API_BASE_PATH, "users/:id/logs"),
            Ping => concatcp!(API_BASE_PATH, "ping"),
        }
    }

    /// Fills in the `:id` segment of the route
    pub fn id_path<T: ToString>(&self, id: T) -> String {
        self.path().replace(":id", &id.to_string())
    }
}
