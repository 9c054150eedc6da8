#![allow(dead_code)]

use agora_authorization::{Principal, UserId};
use agora_forum::{
    Comment, Community, Forum, NewComment, NewCommunity, NewPost, Post, Settings,
};

pub const ALICE: UserId = UserId(1);
pub const BOB: UserId = UserId(2);
pub const CAROL: UserId = UserId(3);
pub const DAVE: UserId = UserId(4);
pub const ERIN: UserId = UserId(5);

pub fn user(id: UserId) -> Principal {
    Principal::user(id)
}

pub fn root() -> Principal {
    Principal::superuser(99)
}

pub fn new_community(name: &str) -> NewCommunity {
    NewCommunity {
        name: name.into(),
        description: None,
    }
}

pub fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.into(),
        text: Some("body".into()),
    }
}

pub fn new_comment(text: &str) -> NewComment {
    NewComment { text: text.into() }
}

/// A forum with two communities and one thread.
///
/// - `rust`: owned by alice, moderated by bob
/// - `go`: owned by alice, moderated by erin
/// - `post`: in `rust`, written by carol
/// - `comment`: on `post`, written by dave
pub struct Seeded {
    pub forum: Forum,
    pub rust: Community,
    pub go: Community,
    pub post: Post,
    pub comment: Comment,
}

pub fn seeded() -> Seeded {
    let forum = Forum::new(Settings::default());
    let alice = user(ALICE);

    let rust = forum
        .create_community(&alice, new_community("rust"))
        .expect("create rust");
    let rust = forum
        .add_moderator(&alice, rust.id, BOB)
        .expect("moderate rust");

    let go = forum
        .create_community(&alice, new_community("go"))
        .expect("create go");
    let go = forum.add_moderator(&alice, go.id, ERIN).expect("moderate go");

    let post = forum
        .create_post(&user(CAROL), rust.id, new_post("hello"))
        .expect("create post");
    let comment = forum
        .create_comment(&user(DAVE), post.id, new_comment("hi"))
        .expect("create comment");

    Seeded {
        forum,
        rust,
        go,
        post,
        comment,
    }
}
