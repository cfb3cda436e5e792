//! REST routes of the matrix service
//!
//! Each [`Route`] knows its HTTP method and path segments. Joining onto a
//! base URL (and percent-encoding the segments) is left to the caller.

use std::fmt;

use crate::types::{LabelId, MatrixId, TaskId};

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every call the client makes against the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `POST /matrices`
    CreateMatrix,
    /// `GET /matrices/{id}`
    GetMatrix(MatrixId),
    /// `POST /matrices/{id}/tasks`
    CreateTask(MatrixId),
    /// `PUT /matrices/{id}/tasks/{task_id}`
    UpdateTask(MatrixId, TaskId),
    /// `DELETE /matrices/{id}/tasks/{task_id}`
    DeleteTask(MatrixId, TaskId),
    /// `POST /matrices/{id}/labels`
    CreateLabel(MatrixId),
    /// `PUT /matrices/{id}/labels/{label_id}`
    UpdateLabel(MatrixId, LabelId),
    /// `DELETE /matrices/{id}/labels/{label_id}`
    DeleteLabel(MatrixId, LabelId),
}

impl Route {
    pub fn method(&self) -> Method {
        match self {
            Route::GetMatrix(_) => Method::Get,
            Route::CreateMatrix | Route::CreateTask(_) | Route::CreateLabel(_) => Method::Post,
            Route::UpdateTask(..) | Route::UpdateLabel(..) => Method::Put,
            Route::DeleteTask(..) | Route::DeleteLabel(..) => Method::Delete,
        }
    }

    /// Unencoded path segments relative to the API base
    pub fn segments(&self) -> Vec<String> {
        let matrices = "matrices".to_string();
        match self {
            Route::CreateMatrix => vec![matrices],
            Route::GetMatrix(id) => vec![matrices, id.to_string()],
            Route::CreateTask(id) => vec![matrices, id.to_string(), "tasks".into()],
            Route::UpdateTask(id, task) | Route::DeleteTask(id, task) => {
                vec![matrices, id.to_string(), "tasks".into(), task.to_string()]
            }
            Route::CreateLabel(id) => vec![matrices, id.to_string(), "labels".into()],
            Route::UpdateLabel(id, label) | Route::DeleteLabel(id, label) => {
                vec![matrices, id.to_string(), "labels".into(), label.to_string()]
            }
        }
    }

    /// Path relative to the API base, for logging
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> MatrixId {
        MatrixId::new("m1").unwrap()
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::CreateMatrix.path(), "/matrices");
        assert_eq!(Route::GetMatrix(id()).path(), "/matrices/m1");
        assert_eq!(Route::CreateTask(id()).path(), "/matrices/m1/tasks");
        assert_eq!(Route::UpdateTask(id(), 4).path(), "/matrices/m1/tasks/4");
        assert_eq!(Route::DeleteTask(id(), 4).path(), "/matrices/m1/tasks/4");
        assert_eq!(Route::CreateLabel(id()).path(), "/matrices/m1/labels");
        assert_eq!(Route::UpdateLabel(id(), 9).path(), "/matrices/m1/labels/9");
        assert_eq!(Route::DeleteLabel(id(), 9).path(), "/matrices/m1/labels/9");
    }

    #[test]
    fn test_route_methods() {
        assert_eq!(Route::CreateMatrix.method(), Method::Post);
        assert_eq!(Route::GetMatrix(id()).method(), Method::Get);
        assert_eq!(Route::UpdateTask(id(), 1).method(), Method::Put);
        assert_eq!(Route::DeleteLabel(id(), 1).method(), Method::Delete);
    }

    #[test]
    fn test_route_display() {
        assert_eq!(Route::DeleteTask(id(), 2).to_string(), "DELETE /matrices/m1/tasks/2");
    }

    #[test]
    fn test_segments_are_unencoded() {
        let odd = MatrixId::new("a b/c").unwrap();
        assert_eq!(Route::GetMatrix(odd).segments(), vec!["matrices", "a b/c"]);
    }
}
