#![allow(dead_code)]

use agora_authorization::{
    CommentId, CommentLink, CommunityId, CommunityRoles, PostId, PostLink, ResourceGraph,
    RoleStore, UserId,
};
use std::collections::BTreeMap;

pub const ALICE: UserId = UserId(1);
pub const BOB: UserId = UserId(2);
pub const CAROL: UserId = UserId(3);
pub const DAVE: UserId = UserId(4);
pub const ERIN: UserId = UserId(5);

/// Minimal in-memory hierarchy for exercising the gate.
#[derive(Debug, Default, Clone)]
pub struct Fixture {
    pub communities: BTreeMap<CommunityId, CommunityRoles>,
    pub posts: BTreeMap<PostId, PostLink>,
    pub comments: BTreeMap<CommentId, CommentLink>,
}

impl Fixture {
    pub fn community(mut self, id: u64, roles: CommunityRoles) -> Self {
        self.communities.insert(CommunityId(id), roles);
        self
    }

    pub fn post(mut self, id: u64, community: u64, author: Option<UserId>) -> Self {
        self.posts.insert(
            PostId(id),
            PostLink {
                community: CommunityId(community),
                author,
            },
        );
        self
    }

    pub fn comment(mut self, id: u64, post: u64, author: Option<UserId>) -> Self {
        self.comments.insert(
            CommentId(id),
            CommentLink {
                post: PostId(post),
                author,
            },
        );
        self
    }

    pub fn move_post(&mut self, post: u64, community: u64) {
        if let Some(link) = self.posts.get_mut(&PostId(post)) {
            link.community = CommunityId(community);
        }
    }
}

impl RoleStore for Fixture {
    fn roles(&self, community: CommunityId) -> Option<&CommunityRoles> {
        self.communities.get(&community)
    }
}

impl ResourceGraph for Fixture {
    fn post(&self, post: PostId) -> Option<PostLink> {
        self.posts.get(&post).copied()
    }

    fn comment(&self, comment: CommentId) -> Option<CommentLink> {
        self.comments.get(&comment).copied()
    }
}

/// `c1` owned by alice and moderated by bob, `c2` owned by alice and
/// moderated by erin. `p1` in `c1` by carol, `k1` on `p1` by dave.
pub fn forum() -> Fixture {
    Fixture::default()
        .community(1, CommunityRoles::owned_by(ALICE).with_moderator(BOB))
        .community(2, CommunityRoles::owned_by(ALICE).with_moderator(ERIN))
        .post(1, 1, Some(CAROL))
        .comment(1, 1, Some(DAVE))
}
