use crate::{
    AccountRemoval, AgoraForumError, Comment, CommentChanges, Community, CommunityChanges,
    NewComment, NewCommunity, NewPost, Post, PostChanges, Settings, Validate, store::Tables,
};
use agora_authorization::{
    CommentId, CommunityId, CommunityRoles, Gate, Operation, PostId, Principal, ResourceKind,
    Target, UserId,
};
use chrono::Utc;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::sync::Arc;

/// Orders records newest first, breaking timestamp ties by descending id.
fn newest_first<T, K: Ord>(mut records: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    records.sort_by_key(|record| Reverse(key(record)));
    records
}

/// The forum service.
///
/// Every unsafe operation takes the write guard, resolves its target through
/// the live records, asks the [`Gate`] and commits before releasing the guard,
/// so a decision is never acted on after the state it was made against has
/// changed. Reads share the read guard.
///
/// Failures are reported in a fixed order: a missing target first, then a
/// missing principal, then lacking permission, then invalid input, then
/// conflicts.
///
/// Cloning a `Forum` yields another handle to the same records.
#[derive(Debug, Clone, Default)]
pub struct Forum {
    tables: Arc<RwLock<Tables>>,
    settings: Arc<Settings>,
    gate: Gate,
}

impl Forum {
    /// Creates an empty forum.
    pub fn new(settings: Settings) -> Self {
        Self {
            tables: Arc::default(),
            settings: Arc::new(settings),
            gate: Gate::new(),
        }
    }

    /// The settings this forum was created with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All communities, newest first.
    pub fn list_communities(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Community>, AgoraForumError> {
        self.gate
            .check_collection(principal, Operation::List, ResourceKind::Community)
            .into_result()?;

        let tables = self.tables.read();
        Ok(newest_first(
            tables.communities().cloned().collect(),
            |community| (community.created_at, community.id),
        ))
    }

    /// Create a community owned by `principal`.
    pub fn create_community(
        &self,
        principal: &Principal,
        community: NewCommunity,
    ) -> Result<Community, AgoraForumError> {
        let attribution = self.gate.authenticate(principal)?;
        community.validate(&self.settings.limits)?;

        let mut tables = self.tables.write();
        if tables.name_taken(&community.name, None) {
            return Err(name_conflict(&community.name));
        }

        let now = Utc::now();
        let created = tables
            .insert_community(|id| Community {
                id,
                name: community.name,
                description: community.description,
                roles: CommunityRoles::owned_by(attribution.user()),
                created_at: now,
                updated_at: now,
            })
            .clone();

        tracing::debug!(community = %created.id, owner = %attribution.user(), "created community");
        Ok(created)
    }

    /// Fetch one community.
    pub fn retrieve_community(
        &self,
        principal: &Principal,
        id: CommunityId,
    ) -> Result<Community, AgoraForumError> {
        let target = Target::Community(id);
        let tables = self.tables.read();
        self.gate
            .authorize(&*tables, principal, Operation::Retrieve, target)?;
        tables
            .community(id)
            .cloned()
            .ok_or(AgoraForumError::NotFound(target))
    }

    /// Replace the editable fields of a community. Only its owner or a
    /// superuser may do so; `owner` in the changes transfers ownership.
    pub fn update_community(
        &self,
        principal: &Principal,
        id: CommunityId,
        changes: CommunityChanges,
    ) -> Result<Community, AgoraForumError> {
        let target = Target::Community(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Update, target)?;
        changes.validate(&self.settings.limits)?;
        if tables.name_taken(&changes.name, Some(id)) {
            return Err(name_conflict(&changes.name));
        }

        let community = tables
            .community_mut(id)
            .ok_or(AgoraForumError::NotFound(target))?;
        community.name = changes.name;
        community.description = changes.description;
        if let Some(owner) = changes.owner {
            community.roles.set_owner(Some(owner));
        }
        community.updated_at = Utc::now();

        tracing::debug!(community = %id, by = %principal, "updated community");
        Ok(community.clone())
    }

    /// Delete a community along with its posts and their comments.
    pub fn delete_community(
        &self,
        principal: &Principal,
        id: CommunityId,
    ) -> Result<(), AgoraForumError> {
        let target = Target::Community(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Delete, target)?;

        let (_, removed) = tables
            .remove_community(id)
            .ok_or(AgoraForumError::NotFound(target))?;

        tracing::debug!(
            community = %id,
            by = %principal,
            posts = removed.posts,
            comments = removed.comments,
            "deleted community"
        );
        Ok(())
    }

    /// Grant `moderator` standing over a community. Gated like an update of
    /// the community; adding an existing moderator changes nothing.
    pub fn add_moderator(
        &self,
        principal: &Principal,
        id: CommunityId,
        moderator: UserId,
    ) -> Result<Community, AgoraForumError> {
        let target = Target::Community(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Update, target)?;

        let community = tables
            .community_mut(id)
            .ok_or(AgoraForumError::NotFound(target))?;
        if community.roles.add_moderator(moderator) {
            community.updated_at = Utc::now();
            tracing::debug!(community = %id, %moderator, by = %principal, "added moderator");
        }
        Ok(community.clone())
    }

    /// Revoke a moderator seat. Removing someone who holds none changes
    /// nothing.
    pub fn remove_moderator(
        &self,
        principal: &Principal,
        id: CommunityId,
        moderator: UserId,
    ) -> Result<Community, AgoraForumError> {
        let target = Target::Community(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Update, target)?;

        let community = tables
            .community_mut(id)
            .ok_or(AgoraForumError::NotFound(target))?;
        if community.roles.remove_moderator(moderator) {
            community.updated_at = Utc::now();
            tracing::debug!(community = %id, %moderator, by = %principal, "removed moderator");
        }
        Ok(community.clone())
    }

    /// Posts in one community, newest first.
    pub fn list_community_posts(
        &self,
        principal: &Principal,
        id: CommunityId,
    ) -> Result<Vec<Post>, AgoraForumError> {
        let tables = self.tables.read();
        self.gate
            .authorize(&*tables, principal, Operation::List, Target::Community(id))?;

        let posts = tables
            .posts()
            .filter(|post| post.community == id)
            .cloned()
            .collect();
        Ok(newest_first(posts, |post| (post.created_at, post.id)))
    }

    /// Create a post in a community, authored by `principal`.
    pub fn create_post(
        &self,
        principal: &Principal,
        community: CommunityId,
        post: NewPost,
    ) -> Result<Post, AgoraForumError> {
        let mut tables = self.tables.write();
        self.gate.authorize(
            &*tables,
            principal,
            Operation::Create,
            Target::Community(community),
        )?;
        let attribution = self.gate.authenticate(principal)?;
        post.validate(&self.settings.limits)?;

        let now = Utc::now();
        let created = tables
            .insert_post(|id| Post {
                id,
                title: post.title,
                text: post.text,
                community,
                author: Some(attribution.user()),
                created_at: now,
                updated_at: now,
            })
            .clone();

        tracing::debug!(post = %created.id, %community, author = %attribution.user(), "created post");
        Ok(created)
    }

    /// All posts across communities, newest first.
    pub fn list_posts(&self, principal: &Principal) -> Result<Vec<Post>, AgoraForumError> {
        self.gate
            .check_collection(principal, Operation::List, ResourceKind::Post)
            .into_result()?;

        let tables = self.tables.read();
        Ok(newest_first(tables.posts().cloned().collect(), |post| {
            (post.created_at, post.id)
        }))
    }

    /// Fetch one post.
    pub fn retrieve_post(&self, principal: &Principal, id: PostId) -> Result<Post, AgoraForumError> {
        let target = Target::Post(id);
        let tables = self.tables.read();
        self.gate
            .authorize(&*tables, principal, Operation::Retrieve, target)?;
        tables
            .post(id)
            .cloned()
            .ok_or(AgoraForumError::NotFound(target))
    }

    /// Replace the editable fields of a post, optionally moving it to
    /// another existing community. The author is never changed.
    pub fn update_post(
        &self,
        principal: &Principal,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Post, AgoraForumError> {
        let target = Target::Post(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Update, target)?;
        changes.validate(&self.settings.limits)?;
        if let Some(community) = changes
            .community
            .filter(|community| tables.community(*community).is_none())
        {
            return Err(AgoraForumError::invalid(
                "community",
                format!("{community} does not exist"),
            ));
        }

        let post = tables
            .post_mut(id)
            .ok_or(AgoraForumError::NotFound(target))?;
        let from = post.community;
        post.title = changes.title;
        post.text = changes.text;
        if let Some(community) = changes.community {
            post.community = community;
        }
        post.updated_at = Utc::now();

        tracing::debug!(
            post = %id,
            by = %principal,
            %from,
            to = %post.community,
            "updated post"
        );
        Ok(post.clone())
    }

    /// Delete a post and its comments.
    pub fn delete_post(&self, principal: &Principal, id: PostId) -> Result<(), AgoraForumError> {
        let target = Target::Post(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Delete, target)?;

        let (_, comments) = tables
            .remove_post(id)
            .ok_or(AgoraForumError::NotFound(target))?;

        tracing::debug!(post = %id, by = %principal, comments, "deleted post");
        Ok(())
    }

    /// Comments on one post, newest first.
    pub fn list_post_comments(
        &self,
        principal: &Principal,
        id: PostId,
    ) -> Result<Vec<Comment>, AgoraForumError> {
        let tables = self.tables.read();
        self.gate
            .authorize(&*tables, principal, Operation::List, Target::Post(id))?;

        let comments = tables
            .comments()
            .filter(|comment| comment.post == id)
            .cloned()
            .collect();
        Ok(newest_first(comments, |comment| {
            (comment.created_at, comment.id)
        }))
    }

    /// Comment on a post as `principal`.
    pub fn create_comment(
        &self,
        principal: &Principal,
        post: PostId,
        comment: NewComment,
    ) -> Result<Comment, AgoraForumError> {
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Create, Target::Post(post))?;
        let attribution = self.gate.authenticate(principal)?;
        comment.validate(&self.settings.limits)?;

        let now = Utc::now();
        let created = tables
            .insert_comment(|id| Comment {
                id,
                text: comment.text,
                post,
                author: Some(attribution.user()),
                created_at: now,
                updated_at: now,
            })
            .clone();

        tracing::debug!(comment = %created.id, %post, author = %attribution.user(), "created comment");
        Ok(created)
    }

    /// Fetch one comment.
    pub fn retrieve_comment(
        &self,
        principal: &Principal,
        id: CommentId,
    ) -> Result<Comment, AgoraForumError> {
        let target = Target::Comment(id);
        let tables = self.tables.read();
        self.gate
            .authorize(&*tables, principal, Operation::Retrieve, target)?;
        tables
            .comment(id)
            .cloned()
            .ok_or(AgoraForumError::NotFound(target))
    }

    /// Replace the text of a comment.
    pub fn update_comment(
        &self,
        principal: &Principal,
        id: CommentId,
        changes: CommentChanges,
    ) -> Result<Comment, AgoraForumError> {
        let target = Target::Comment(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Update, target)?;
        changes.validate(&self.settings.limits)?;

        let comment = tables
            .comment_mut(id)
            .ok_or(AgoraForumError::NotFound(target))?;
        comment.text = changes.text;
        comment.updated_at = Utc::now();

        tracing::debug!(comment = %id, by = %principal, "updated comment");
        Ok(comment.clone())
    }

    /// Delete a comment.
    pub fn delete_comment(
        &self,
        principal: &Principal,
        id: CommentId,
    ) -> Result<(), AgoraForumError> {
        let target = Target::Comment(id);
        let mut tables = self.tables.write();
        self.gate
            .authorize(&*tables, principal, Operation::Delete, target)?;

        tables
            .remove_comment(id)
            .ok_or(AgoraForumError::NotFound(target))?;

        tracing::debug!(comment = %id, by = %principal, "deleted comment");
        Ok(())
    }

    /// Remove every reference to an account that is being deleted.
    ///
    /// Owned communities become ownerless, moderator seats are dropped and
    /// authored posts and comments lose their author. Called by the account
    /// layer once the account is gone, so no principal is checked here.
    pub fn remove_account(&self, user: UserId) -> AccountRemoval {
        let removal = self.tables.write().forget_user(user);
        tracing::info!(
            %user,
            communities = removal.communities,
            posts = removal.posts,
            comments = removal.comments,
            "removed account"
        );
        removal
    }
}

fn name_conflict(name: &str) -> AgoraForumError {
    AgoraForumError::Conflict(format!("a community named {name:?} already exists"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_orders_newest_first_with_id_tiebreak() {
        let now = Utc::now();
        let records = vec![(now, 1), (now, 3), (now - chrono::Duration::seconds(1), 9)];
        assert_eq!(
            newest_first(records, |record| *record),
            vec![(now, 3), (now, 1), (now - chrono::Duration::seconds(1), 9)]
        );
    }

    #[test]
    fn it_shares_records_between_clones() {
        let forum = Forum::default();
        let handle = forum.clone();
        forum
            .create_community(
                &Principal::user(1),
                NewCommunity {
                    name: "rust".into(),
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(handle.list_communities(&Principal::Anonymous).unwrap().len(), 1);
    }
}
