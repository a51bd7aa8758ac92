//! Domain entities - the core business objects.

mod post;

mod role;

pub use post::Post;
pub use role::Role;
