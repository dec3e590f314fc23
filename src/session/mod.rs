//! Persisted seller session
//!
//! [`SessionStore`] owns the single `loginResponse` slot. The accessors in
//! [`accessors`] re-read that slot on every call, so two accessor calls only
//! agree with each other if nothing wrote in between.

mod accessors;
mod store;

pub use store::{
    CREATE_STORE_RESPONSE_KEY, SESSION_KEY, SIGNUP_RESPONSE_KEY, SessionStore,
};
