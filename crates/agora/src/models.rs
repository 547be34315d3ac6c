//! These models represent the messages passed to the generation service.
//!
//! The wire format of the service is close to, but not exactly, the shape
//! we want to work with internally: content arrives from the presentation
//! layer either as a bare instruction string or as an instruction plus a
//! list of uploaded image URLs, and leaves as a role-tagged multi-part
//! message. The internal structs here are the single format everything is
//! converted into at the boundary; providers convert back out to their own
//! wire specification.
pub mod content;
pub mod message;
pub mod role;
