//! Wire models shared by the `backend` server and the `frontend` client.

pub mod model;
pub mod requests;
