//! Tests for the post service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use pagination::{Page, PageRequest};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPostRepository, MockUserRepository};
use crate::domain::{
    DisplayName, ErrorCode, Post, PostContent, PostState, PostText, User, UserId, Username,
};

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn user(username: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("valid username"),
        DisplayName::new("Test User").expect("valid name"),
        None,
        None,
    )
}

fn post_id(raw: i64) -> PostId {
    PostId::new(raw).expect("valid post id")
}

fn text(raw: &str) -> PostText {
    PostText::new(raw).expect("valid text")
}

fn stored(id: i64, author: &User, parent: Option<i64>, body: &str, state: PostState) -> Post {
    Post {
        id: post_id(id),
        author_id: *author.id(),
        parent_id: parent.map(post_id),
        text: text(body),
        total_likes: 0,
        state,
        created_at: now(),
        updated_at: now(),
    }
}

fn authored(post: Post, author: &User) -> AuthoredPost {
    AuthoredPost {
        post,
        author: author.clone(),
    }
}

fn make_service(
    posts: MockPostRepository,
    users: MockUserRepository,
) -> PostService<MockPostRepository, MockUserRepository> {
    PostService::new(Arc::new(posts), Arc::new(users), Arc::new(FixtureClock(now())))
}

#[fixture]
fn author() -> User {
    user("author")
}

#[rstest]
#[tokio::test]
async fn create_top_level_post_starts_with_zero_likes(author: User) {
    let mut users = MockUserRepository::new();
    let mut posts = MockPostRepository::new();
    let found = author.clone();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    let author_id = *author.id();
    posts
        .expect_create()
        .withf(move |new_post| {
            new_post.author_id == author_id
                && new_post.parent_id.is_none()
                && new_post.created_at == now()
        })
        .times(1)
        .return_once(move |new_post| {
            Ok(Post {
                id: post_id(1),
                author_id: new_post.author_id,
                parent_id: None,
                text: new_post.text.clone(),
                total_likes: 0,
                state: PostState::Active,
                created_at: new_post.created_at,
                updated_at: new_post.created_at,
            })
        });

    let view = make_service(posts, users)
        .create_post(CreatePostRequest {
            author_id: *author.id(),
            text: text("hello"),
            parent_id: None,
        })
        .await
        .expect("create succeeds");

    assert_eq!(view.total_likes, 0);
    assert_eq!(view.parent_id, None);
    assert_eq!(view.text(), "hello");
    assert_eq!(view.author(), Some(&author));
}

#[rstest]
#[tokio::test]
async fn create_with_unknown_author_persists_nothing() {
    let mut users = MockUserRepository::new();
    let mut posts = MockPostRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    posts.expect_create().times(0);

    let err = make_service(posts, users)
        .create_post(CreatePostRequest {
            author_id: UserId::random(),
            text: text("hello"),
            parent_id: None,
        })
        .await
        .expect_err("unknown author");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(None)]
#[case(Some(PostState::Deleted { at: now() }))]
#[tokio::test]
async fn reply_requires_active_parent(author: User, #[case] parent_state: Option<PostState>) {
    let mut users = MockUserRepository::new();
    let mut posts = MockPostRepository::new();
    let found = author.clone();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    let parent = parent_state.map(|state| authored(stored(1, &author, None, "root", state), &author));
    posts
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(parent));
    posts.expect_create().times(0);

    let err = make_service(posts, users)
        .create_post(CreatePostRequest {
            author_id: *author.id(),
            text: text("reply"),
            parent_id: Some(post_id(1)),
        })
        .await
        .expect_err("parent missing or tombstoned");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "post 1 not found");
}

#[rstest]
#[tokio::test]
async fn reply_to_active_parent_records_parent(author: User) {
    let mut users = MockUserRepository::new();
    let mut posts = MockPostRepository::new();
    let found = author.clone();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    let parent = authored(stored(1, &author, None, "root", PostState::Active), &author);
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    let reply = stored(2, &author, Some(1), "reply", PostState::Active);
    posts
        .expect_create()
        .withf(|new_post| new_post.parent_id == Some(post_id(1)))
        .times(1)
        .return_once(move |_| Ok(reply));

    let view = make_service(posts, users)
        .create_post(CreatePostRequest {
            author_id: *author.id(),
            text: text("reply"),
            parent_id: Some(post_id(1)),
        })
        .await
        .expect("reply created");

    assert_eq!(view.parent_id, Some(post_id(1)));
}

#[rstest]
#[tokio::test]
async fn update_by_non_author_is_unauthorized(author: User) {
    let mut posts = MockPostRepository::new();
    let existing = authored(stored(2, &author, Some(1), "hi", PostState::Active), &author);
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    posts.expect_update_text().times(0);

    let err = make_service(posts, MockUserRepository::new())
        .update_post(UpdatePostRequest {
            user_id: UserId::random(),
            post_id: post_id(2),
            text: text("hijacked"),
        })
        .await
        .expect_err("non-author update");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn update_of_tombstoned_post_is_not_found(author: User) {
    let mut posts = MockPostRepository::new();
    let existing = authored(
        stored(2, &author, None, "hi", PostState::Deleted { at: now() }),
        &author,
    );
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    posts.expect_update_text().times(0);

    let err = make_service(posts, MockUserRepository::new())
        .update_post(UpdatePostRequest {
            user_id: *author.id(),
            post_id: post_id(2),
            text: text("edit"),
        })
        .await
        .expect_err("tombstoned post");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_by_author_replaces_text(author: User) {
    let mut posts = MockPostRepository::new();
    let existing = authored(stored(2, &author, None, "before", PostState::Active), &author);
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    let updated = stored(2, &author, None, "after", PostState::Active);
    posts
        .expect_update_text()
        .withf(|id, new_text, at| *id == post_id(2) && new_text.as_ref() == "after" && *at == now())
        .times(1)
        .return_once(move |_, _, _| Ok(Some(updated)));

    let view = make_service(posts, MockUserRepository::new())
        .update_post(UpdatePostRequest {
            user_id: *author.id(),
            post_id: post_id(2),
            text: text("after"),
        })
        .await
        .expect("author update succeeds");

    assert_eq!(view.text(), "after");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_posts(#[case] deleted: bool, #[case] expected: Option<ErrorCode>) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_soft_delete()
        .withf(|id, at| *id == post_id(4) && *at == now())
        .times(1)
        .return_once(move |_, _| Ok(deleted));

    let result = make_service(posts, MockUserRepository::new())
        .delete_post(post_id(4))
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn get_post_renders_tombstone_with_replies(author: User) {
    let replier = user("replier");
    let mut posts = MockPostRepository::new();
    let root = authored(
        stored(1, &author, None, "hello", PostState::Deleted { at: now() }),
        &author,
    );
    posts
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(root)));
    let reply = authored(stored(2, &replier, Some(1), "hi", PostState::Active), &replier);
    posts
        .expect_list_replies()
        .withf(|parent, _| *parent == post_id(1))
        .times(1)
        .return_once(move |_, page| Ok(Page::new(vec![reply], page, 1)));

    let thread = make_service(posts, MockUserRepository::new())
        .get_post(post_id(1), &PageRequest::default())
        .await
        .expect("thread loads");

    assert!(matches!(
        thread.post.content,
        PostContent::Tombstoned { .. }
    ));
    let reply_ids: Vec<_> = thread.replies.data().iter().map(|view| view.id).collect();
    assert_eq!(reply_ids, vec![post_id(2)]);
    assert_eq!(thread.replies.data().first().map(PostView::text), Some("hi"));
}

#[rstest]
#[tokio::test]
async fn get_post_reports_unknown_ids() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().return_once(|_| Ok(None));
    posts.expect_list_replies().times(0);

    let err = make_service(posts, MockUserRepository::new())
        .get_post(post_id(9), &PageRequest::default())
        .await
        .expect_err("unknown post");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_posts_maps_page(author: User) {
    let mut posts = MockPostRepository::new();
    let first = authored(stored(3, &author, None, "newest", PostState::Active), &author);
    posts
        .expect_list_top_level()
        .times(1)
        .return_once(move |page| Ok(Page::new(vec![first], page, 21)));

    let request = PageRequest::new(Some(1), Some(10), None).expect("valid page");
    let page = make_service(posts, MockUserRepository::new())
        .list_posts(&request)
        .await
        .expect("listing succeeds");

    assert_eq!(page.meta().count(), 21);
    assert_eq!(page.meta().max_page(), 3);
    assert_eq!(page.data().first().map(PostView::text), Some("newest"));
}

#[rstest]
#[case(PostRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(PostRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(PostRepositoryError::missing_reference("parent 3"), ErrorCode::NotFound)]
#[tokio::test]
async fn repository_failures_map_to_domain_codes(
    #[case] failure: PostRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_list_top_level()
        .return_once(move |_| Err(failure));

    let err = make_service(posts, MockUserRepository::new())
        .list_posts(&PageRequest::default())
        .await
        .expect_err("repository failure");

    assert_eq!(err.code(), expected);
}
