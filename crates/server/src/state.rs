use std::sync::Arc;

use service::student::repository::StudentRepository;
use service::StudentService;

/// Shared handler state; cheap to clone per request.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<StudentService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { students: Arc::new(StudentService::new(repo)) }
    }
}
