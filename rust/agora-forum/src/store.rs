//! Volatile in-memory record storage.
//!
//! Records are kept in ordered maps keyed by identifier. Data is not
//! persisted and is lost when the store is dropped.
//!
//! # Structure
//!
//! - `communities` - keyed by [`CommunityId`], each carrying its roles
//! - `posts` - keyed by [`PostId`], each linking to its community
//! - `comments` - keyed by [`CommentId`], each linking to its post
//!
//! The store implements [`RoleStore`] and [`ResourceGraph`] directly over
//! these maps, so every lookup reflects the current links.

use crate::{AccountRemoval, Comment, Community, Post};
use agora_authorization::{
    CommentId, CommentLink, CommunityId, CommunityRoles, PostId, PostLink, ResourceGraph,
    RoleStore, UserId,
};
use std::collections::BTreeMap;

/// Counts of records removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Removed {
    pub posts: usize,
    pub comments: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    communities: BTreeMap<CommunityId, Community>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    last_id: u64,
}

impl Tables {
    /// Identifiers are unique across kinds and never reused.
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    pub fn community(&self, id: CommunityId) -> Option<&Community> {
        self.communities.get(&id)
    }

    pub fn community_mut(&mut self, id: CommunityId) -> Option<&mut Community> {
        self.communities.get_mut(&id)
    }

    pub fn communities(&self) -> impl Iterator<Item = &Community> {
        self.communities.values()
    }

    pub fn name_taken(&self, name: &str, except: Option<CommunityId>) -> bool {
        self.communities
            .values()
            .any(|community| community.name == name && Some(community.id) != except)
    }

    pub fn insert_community(&mut self, build: impl FnOnce(CommunityId) -> Community) -> &Community {
        let id = CommunityId(self.next_id());
        self.communities.entry(id).or_insert(build(id))
    }

    /// Removes a community with all of its posts and their comments.
    pub fn remove_community(&mut self, id: CommunityId) -> Option<(Community, Removed)> {
        let community = self.communities.remove(&id)?;
        let posts: Vec<PostId> = self
            .posts
            .values()
            .filter(|post| post.community == id)
            .map(|post| post.id)
            .collect();

        let mut removed = Removed::default();
        for post in posts {
            if let Some((_, comments)) = self.remove_post(post) {
                removed.posts += 1;
                removed.comments += comments;
            }
        }
        Some((community, removed))
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn post_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.get_mut(&id)
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn insert_post(&mut self, build: impl FnOnce(PostId) -> Post) -> &Post {
        let id = PostId(self.next_id());
        self.posts.entry(id).or_insert(build(id))
    }

    /// Removes a post and its comments, returning how many comments went
    /// with it.
    pub fn remove_post(&mut self, id: PostId) -> Option<(Post, usize)> {
        let post = self.posts.remove(&id)?;
        let before = self.comments.len();
        self.comments.retain(|_, comment| comment.post != id);
        Some((post, before - self.comments.len()))
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.get_mut(&id)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    pub fn insert_comment(&mut self, build: impl FnOnce(CommentId) -> Comment) -> &Comment {
        let id = CommentId(self.next_id());
        self.comments.entry(id).or_insert(build(id))
    }

    pub fn remove_comment(&mut self, id: CommentId) -> Option<Comment> {
        self.comments.remove(&id)
    }

    /// Clears every reference to `user`: ownerships, moderator seats and
    /// authorships. Records themselves are kept.
    pub fn forget_user(&mut self, user: UserId) -> AccountRemoval {
        let mut removal = AccountRemoval::default();
        for community in self.communities.values_mut() {
            if community.roles.forget(user) {
                removal.communities += 1;
            }
        }
        for post in self.posts.values_mut() {
            if post.author == Some(user) {
                post.author = None;
                removal.posts += 1;
            }
        }
        for comment in self.comments.values_mut() {
            if comment.author == Some(user) {
                comment.author = None;
                removal.comments += 1;
            }
        }
        removal
    }
}

impl RoleStore for Tables {
    fn roles(&self, community: CommunityId) -> Option<&CommunityRoles> {
        self.communities.get(&community).map(|community| &community.roles)
    }
}

impl ResourceGraph for Tables {
    fn post(&self, post: PostId) -> Option<PostLink> {
        self.posts.get(&post).map(|post| PostLink {
            community: post.community,
            author: post.author,
        })
    }

    fn comment(&self, comment: CommentId) -> Option<CommentLink> {
        self.comments.get(&comment).map(|comment| CommentLink {
            post: comment.post,
            author: comment.author,
        })
    }
}
