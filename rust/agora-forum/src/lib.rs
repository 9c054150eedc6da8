//! An in-memory forum of communities, posts and comments.
//!
//! Every write goes through the [`Gate`](agora_authorization::Gate) from
//! `agora-authorization`: reads are public, creation needs an authenticated
//! principal who becomes the new record's owner or author, and updates and
//! deletes need the author, the community's staff or a superuser.
//!
//! ```rust
//! use agora_forum::*;
//! use agora_authorization::{Principal, UserId};
//!
//! # fn main() -> Result<(), AgoraForumError> {
//! let forum = Forum::new(Settings::default());
//! let alice = Principal::user(1);
//! let carol = Principal::user(3);
//!
//! let community = forum.create_community(
//!     &alice,
//!     NewCommunity { name: "rust".into(), description: None },
//! )?;
//! forum.add_moderator(&alice, community.id, UserId(2))?;
//!
//! let post = forum.create_post(
//!     &carol,
//!     community.id,
//!     NewPost { title: "hello".into(), text: None },
//! )?;
//!
//! // Moderators may remove posts they did not write.
//! forum.delete_post(&Principal::user(2), post.id)?;
//!
//! // Anonymous principals may read but never write.
//! assert_eq!(
//!     forum.delete_community(&Principal::Anonymous, community.id).unwrap_err().status(),
//!     401
//! );
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod settings;
pub use settings::*;

mod record;
pub use record::*;

mod payload;
pub use payload::*;

mod store;

mod service;
pub use service::*;
