//! Comment routes.

mod support;

use agora_authorization::{CommentId, PostId, Principal, Target};
use agora_forum::{AgoraForumError, CommentChanges, NewComment};
use pretty_assertions::assert_eq;
use support::*;
use testresult::TestResult;

fn reword(text: &str) -> CommentChanges {
    CommentChanges { text: text.into() }
}

#[test]
fn it_attributes_comments_to_the_principal() -> TestResult {
    let Seeded { forum, post, .. } = seeded();
    let payload: NewComment = serde_json::from_str(r#"{ "text": "me too", "author": 3 }"#)?;

    let comment = forum.create_comment(&user(ERIN), post.id, payload)?;
    assert_eq!(comment.author, Some(ERIN));
    assert_eq!(comment.post, post.id);
    Ok(())
}

#[test]
fn it_requires_authentication_to_comment() {
    let Seeded { forum, post, .. } = seeded();
    assert_eq!(
        forum
            .create_comment(&Principal::Anonymous, post.id, new_comment("anon"))
            .unwrap_err()
            .status(),
        401
    );
}

#[test]
fn it_reports_missing_posts_when_commenting() {
    let Seeded { forum, .. } = seeded();
    assert_eq!(
        forum
            .create_comment(&user(DAVE), PostId(404), new_comment("lost"))
            .unwrap_err(),
        AgoraForumError::NotFound(Target::Post(PostId(404)))
    );
}

#[test_log::test]
fn it_lets_author_owner_and_moderators_edit() -> TestResult {
    let Seeded { forum, comment, .. } = seeded();

    for editor in [DAVE, ALICE, BOB] {
        let updated = forum.update_comment(&user(editor), comment.id, reword("edited"))?;
        assert_eq!(updated.text, "edited");
        assert_eq!(updated.author, Some(DAVE));
    }
    Ok(())
}

#[test]
fn it_forbids_the_post_author() {
    let Seeded { forum, comment, .. } = seeded();

    assert_eq!(
        forum
            .update_comment(&user(CAROL), comment.id, reword("mine"))
            .unwrap_err(),
        AgoraForumError::Forbidden
    );
    assert_eq!(
        forum.delete_comment(&user(ERIN), comment.id).unwrap_err(),
        AgoraForumError::Forbidden
    );
}

#[test]
fn it_requires_authentication_to_edit() {
    let Seeded { forum, comment, .. } = seeded();
    assert_eq!(
        forum
            .delete_comment(&Principal::Anonymous, comment.id)
            .unwrap_err(),
        AgoraForumError::Unauthenticated
    );
}

#[test]
fn it_lets_moderators_delete() -> TestResult {
    let Seeded {
        forum,
        post,
        comment,
        ..
    } = seeded();
    forum.delete_comment(&user(BOB), comment.id)?;

    assert!(forum.list_post_comments(&Principal::Anonymous, post.id)?.is_empty());
    assert_eq!(
        forum
            .delete_comment(&user(BOB), comment.id)
            .unwrap_err()
            .status(),
        404
    );
    Ok(())
}

#[test]
fn it_validates_text() {
    let Seeded { forum, post, comment, .. } = seeded();
    let long = "x".repeat(513);

    assert_eq!(
        forum
            .create_comment(&user(DAVE), post.id, new_comment(&long))
            .unwrap_err()
            .status(),
        400
    );
    assert_eq!(
        forum
            .update_comment(&user(DAVE), comment.id, reword(" "))
            .unwrap_err(),
        AgoraForumError::Invalid {
            field: "text",
            reason: "may not be blank".into(),
        }
    );
}

#[test]
fn it_lists_comments_on_one_post() -> TestResult {
    let Seeded {
        forum,
        rust,
        post,
        comment,
        ..
    } = seeded();
    let other = forum.create_post(&user(ALICE), rust.id, new_post("other"))?;
    forum.create_comment(&user(BOB), other.id, new_comment("elsewhere"))?;
    let newer = forum.create_comment(&user(CAROL), post.id, new_comment("reply"))?;

    let listed = forum.list_post_comments(&Principal::Anonymous, post.id)?;
    assert_eq!(listed, vec![newer, comment]);
    Ok(())
}

#[test]
fn it_reports_missing_comments() {
    let Seeded { forum, .. } = seeded();
    assert_eq!(
        forum
            .retrieve_comment(&Principal::Anonymous, CommentId(404))
            .unwrap_err(),
        AgoraForumError::NotFound(Target::Comment(CommentId(404)))
    );
}
