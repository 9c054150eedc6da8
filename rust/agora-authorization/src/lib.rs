//! Hierarchical authorization for forum resources.
//!
//! Resources form a three-level hierarchy of communities, posts and comments.
//! Roles (owner, moderators) are attached only to communities; posts and
//! comments inherit them through their ancestor chain, which is resolved
//! from live state on every check.
//!
//! # Quick Example
//!
//! ```rust
//! use agora_authorization::*;
//!
//! let roles = CommunityRoles::owned_by(1).with_moderator(2);
//! let post = Resolved::Post {
//!     id: PostId(1),
//!     author: Some(UserId(3)),
//!     community: CommunityId(1),
//!     roles: &roles,
//! };
//!
//! let gate = Gate::new();
//!
//! // Moderators of the post's community may delete it.
//! assert!(gate.check(&Principal::user(2), Operation::Delete, &post).is_allowed());
//!
//! // Anybody may read it.
//! assert!(gate.check(&Principal::Anonymous, Operation::Retrieve, &post).is_allowed());
//!
//! // Unrelated users may not touch it.
//! assert_eq!(
//!     gate.check(&Principal::user(4), Operation::Update, &post),
//!     Decision::Deny(Denial::Forbidden)
//! );
//! ```
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Principal`] | Who is acting (a [`User`] or anonymous) |
//! | [`RoleStore`] | Owner and moderators of each community |
//! | [`ResourceGraph`] | Post and comment links, resolves [`Resolved`] chains |
//! | [`Predicate`] | Atomic tests, tabled per [`ResourceKind`] |
//! | [`evaluate`] | The OR-combined policy for updates and deletes |
//! | [`Gate`] | Entry point: safe bypass, anonymous short-circuit, creation |
//! | [`Decision`] | [`Grant`] or [`Denial`] |

mod error;
pub use error::*;

mod principal;
pub use principal::*;

mod operation;
pub use operation::*;

mod roles;
pub use roles::*;

mod graph;
pub use graph::*;

mod predicate;
pub use predicate::*;

mod policy;
pub use policy::*;

mod gate;
pub use gate::*;
