use crate::{servers::Servers, session::Session};
use std::sync::Arc;

pub type ClonableState = Arc<State>;

pub struct State {
    pub session: Session,
    pub servers: Servers,
}
