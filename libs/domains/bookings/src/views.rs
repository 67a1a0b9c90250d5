use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain_items::{Item, ItemError, ItemRepository};
use domain_users::{UserError, UserRepository};

use crate::{
    error::{BookingError, BookingResult},
    models::{
        Booking, BookingBrief, Comment, CommentResponse, CreateComment, ItemView, NewCommentRecord,
    },
    repository::{BookingRepository, CommentRepository},
};

/// The availability projector and the comment gate. Builds item views with
/// the derived last/next booking markers for owners and the raw history for
/// everyone else, and admits comments only from renters with a completed
/// APPROVED booking.
pub struct ItemViewService<B, C, I, U>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    bookings: Arc<B>,
    comments: Arc<C>,
    items: Arc<I>,
    users: Arc<U>,
}

impl<B, C, I, U> Clone for ItemViewService<B, C, I, U>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            comments: Arc::clone(&self.comments),
            items: Arc::clone(&self.items),
            users: Arc::clone(&self.users),
        }
    }
}

/// Latest finished and earliest upcoming booking at the given instant.
fn project(bookings: &[Booking], now: DateTime<Utc>) -> (Option<BookingBrief>, Option<BookingBrief>) {
    let last = bookings
        .iter()
        .filter(|b| b.end < now)
        .max_by_key(|b| b.end)
        .map(BookingBrief::from);
    let next = bookings
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| b.start)
        .map(BookingBrief::from);

    (last, next)
}

fn base_view(item: Item) -> ItemView {
    ItemView {
        id: item.id,
        name: item.name,
        description: item.description,
        available: item.available,
        request_id: item.request_id,
        last_booking: None,
        next_booking: None,
        bookings: None,
        comments: Vec::new(),
    }
}

impl<B, C, I, U> ItemViewService<B, C, I, U>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(bookings: Arc<B>, comments: Arc<C>, items: Arc<I>, users: Arc<U>) -> Self {
        Self {
            bookings,
            comments,
            items,
            users,
        }
    }

    /// Owners see the last/next markers computed over every booking on the
    /// item; other callers see the raw booking list instead.
    pub async fn get_item_view(&self, item_id: i64, caller_id: i64) -> BookingResult<ItemView> {
        let item = self.require_item(item_id).await?;
        let is_owner = item.owner_id == caller_id;

        let bookings = self.bookings.list_by_item(item_id).await?;
        let comments = self.comments.list_by_item(item_id).await?;

        let mut view = base_view(item);
        view.comments = self.comments_to_responses(comments).await?;

        if is_owner {
            let (last, next) = project(&bookings, Utc::now());
            view.last_booking = last;
            view.next_booking = next;
        } else {
            view.bookings = Some(bookings);
        }

        Ok(view)
    }

    /// Batched owner catalog. Unlike the single-item path this projects over
    /// APPROVED bookings only, kept as-is for compatibility.
    pub async fn get_owner_item_views(&self, owner_id: i64) -> BookingResult<Vec<ItemView>> {
        let items = self
            .items
            .list_by_owner(owner_id)
            .await
            .map_err(BookingError::from)?;
        let item_ids: Vec<i64> = items.iter().map(|item| item.id).collect();

        let mut bookings_by_item: HashMap<i64, Vec<Booking>> = HashMap::new();
        for booking in self.bookings.list_approved_for_items(item_ids.clone()).await? {
            bookings_by_item
                .entry(booking.item_id)
                .or_default()
                .push(booking);
        }

        let mut comments_by_item: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in self.comments.list_for_items(item_ids).await? {
            comments_by_item
                .entry(comment.item_id)
                .or_default()
                .push(comment);
        }

        let now = Utc::now();
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let item_id = item.id;
            let mut view = base_view(item);

            if let Some(approved) = bookings_by_item.get(&item_id) {
                let (last, next) = project(approved, now);
                view.last_booking = last;
                view.next_booking = next;
            }
            view.comments = self
                .comments_to_responses(comments_by_item.remove(&item_id).unwrap_or_default())
                .await?;

            views.push(view);
        }

        Ok(views)
    }

    /// Substring search over available items, each hit decorated like the
    /// single-item owner path. Blank text short-circuits to nothing.
    pub async fn search_item_views(&self, text: &str) -> BookingResult<Vec<ItemView>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items = self.items.search(text).await.map_err(BookingError::from)?;
        let now = Utc::now();

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let item_id = item.id;
            let bookings = self.bookings.list_by_item(item_id).await?;
            let comments = self.comments.list_by_item(item_id).await?;

            let mut view = base_view(item);
            let (last, next) = project(&bookings, now);
            view.last_booking = last;
            view.next_booking = next;
            view.comments = self.comments_to_responses(comments).await?;

            views.push(view);
        }

        Ok(views)
    }

    /// Admits a comment only when the author holds an APPROVED booking on
    /// the item that already ended.
    pub async fn create_comment(
        &self,
        author_id: i64,
        item_id: i64,
        input: CreateComment,
    ) -> BookingResult<CommentResponse> {
        if input.text.trim().is_empty() {
            return Err(BookingError::Validation("Comment text is empty".to_string()));
        }

        let author = self
            .users
            .get_by_id(author_id)
            .await
            .map_err(BookingError::from)?
            .ok_or_else(|| BookingError::from(UserError::NotFound(author_id)))?;
        self.require_item(item_id).await?;

        let now = Utc::now();
        if !self
            .bookings
            .has_completed_approved(author_id, item_id, now)
            .await?
        {
            return Err(BookingError::Validation(
                "User has not booked this item or booking is not completed".to_string(),
            ));
        }

        let comment = self
            .comments
            .create(NewCommentRecord {
                text: input.text,
                item_id,
                author_id,
                created: now,
            })
            .await?;

        Ok(CommentResponse {
            id: comment.id,
            text: comment.text,
            author_name: author.name,
            created: comment.created,
        })
    }

    async fn require_item(&self, id: i64) -> BookingResult<Item> {
        self.items
            .get_by_id(id)
            .await
            .map_err(BookingError::from)?
            .ok_or_else(|| BookingError::from(ItemError::NotFound(id)))
    }

    /// Resolves author names with one batched lookup.
    async fn comments_to_responses(
        &self,
        comments: Vec<Comment>,
    ) -> BookingResult<Vec<CommentResponse>> {
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<i64> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i64, String> = self
            .users
            .get_many(author_ids)
            .await
            .map_err(BookingError::from)?
            .into_iter()
            .map(|user| (user.id, user.name))
            .collect();

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author_name = authors
                    .get(&comment.author_id)
                    .cloned()
                    .unwrap_or_default();
                CommentResponse {
                    id: comment.id,
                    text: comment.text,
                    author_name,
                    created: comment.created,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use crate::repository::{MockBookingRepository, MockCommentRepository};
    use crate::test_support::{item, user, MockItems, MockUsers};
    use chrono::Duration;
    use mockall::predicate::eq;

    type Service = ItemViewService<MockBookingRepository, MockCommentRepository, MockItems, MockUsers>;

    fn service(
        bookings: MockBookingRepository,
        comments: MockCommentRepository,
        items: MockItems,
        users: MockUsers,
    ) -> Service {
        ItemViewService::new(
            Arc::new(bookings),
            Arc::new(comments),
            Arc::new(items),
            Arc::new(users),
        )
    }

    fn booking(id: i64, item_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
        Booking {
            id,
            start,
            end,
            item_id,
            booker_id: 20,
            status: BookingStatus::Approved,
        }
    }

    #[tokio::test]
    async fn owner_view_projects_last_and_next_markers() {
        let now = Utc::now();
        let day = Duration::days(1);
        let finished = booking(1, 1, now - day * 2, now - day);
        let upcoming = booking(2, 1, now + day, now + day * 2);
        let finished_end = finished.end;
        let upcoming_start = upcoming.start;

        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list_by_item()
            .with(eq(1))
            .returning(move |_| Ok(vec![finished.clone(), upcoming.clone()]));
        let mut comments = MockCommentRepository::new();
        comments.expect_list_by_item().returning(|_| Ok(Vec::new()));
        let mut items = MockItems::new();
        items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(1, 10, "Drill", true))));
        let users = MockUsers::new();

        let view = service(bookings, comments, items, users)
            .get_item_view(1, 10)
            .await
            .unwrap();

        assert_eq!(view.last_booking.as_ref().unwrap().end, finished_end);
        assert_eq!(view.next_booking.as_ref().unwrap().start, upcoming_start);
        assert!(view.bookings.is_none());
    }

    #[tokio::test]
    async fn non_owner_view_exposes_raw_bookings_without_markers() {
        let now = Utc::now();
        let day = Duration::days(1);
        let history = booking(1, 1, now - day * 2, now - day);

        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list_by_item()
            .returning(move |_| Ok(vec![history.clone()]));
        let mut comments = MockCommentRepository::new();
        comments.expect_list_by_item().returning(|_| Ok(Vec::new()));
        let mut items = MockItems::new();
        items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(1, 10, "Drill", true))));
        let users = MockUsers::new();

        let view = service(bookings, comments, items, users)
            .get_item_view(1, 20)
            .await
            .unwrap();

        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
        assert_eq!(view.bookings.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn owner_catalog_projects_over_approved_bookings() {
        let now = Utc::now();
        let day = Duration::days(1);
        let finished = booking(1, 1, now - day * 2, now - day);
        let finished_end = finished.end;

        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list_approved_for_items()
            .with(eq(vec![1, 2]))
            .returning(move |_| Ok(vec![finished.clone()]));
        let mut comments = MockCommentRepository::new();
        comments.expect_list_for_items().returning(|_| Ok(Vec::new()));
        let mut items = MockItems::new();
        items.expect_list_by_owner().with(eq(10)).returning(|_| {
            Ok(vec![item(1, 10, "Drill", true), item(2, 10, "Saw", true)])
        });
        let users = MockUsers::new();

        let views = service(bookings, comments, items, users)
            .get_owner_item_views(10)
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].last_booking.as_ref().unwrap().end, finished_end);
        assert!(views[1].last_booking.is_none());
        assert!(views[1].next_booking.is_none());
    }

    #[tokio::test]
    async fn blank_search_returns_nothing() {
        let bookings = MockBookingRepository::new();
        let comments = MockCommentRepository::new();
        let items = MockItems::new();
        let users = MockUsers::new();

        let views = service(bookings, comments, items, users)
            .search_item_views("   ")
            .await
            .unwrap();

        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn search_decorates_every_hit() {
        let bookings = {
            let mut mock = MockBookingRepository::new();
            mock.expect_list_by_item().returning(|_| Ok(Vec::new()));
            mock
        };
        let comments = {
            let mut mock = MockCommentRepository::new();
            mock.expect_list_by_item().returning(|_| Ok(Vec::new()));
            mock
        };
        let mut items = MockItems::new();
        items
            .expect_search()
            .with(eq("drill"))
            .returning(|_| Ok(vec![item(1, 10, "Drill", true)]));
        let users = MockUsers::new();

        let views = service(bookings, comments, items, users)
            .search_item_views("drill")
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "Drill");
    }

    #[tokio::test]
    async fn comment_requires_completed_approved_booking() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_has_completed_approved()
            .returning(|_, _, _| Ok(false));
        let comments = MockCommentRepository::new();
        let mut items = MockItems::new();
        items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(1, 10, "Drill", true))));
        let mut users = MockUsers::new();
        users
            .expect_get_by_id()
            .returning(|id| Ok(Some(user(id, "Bob"))));

        let result = service(bookings, comments, items, users)
            .create_comment(20, 1, CreateComment {
                text: "Great drill".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(BookingError::Validation(msg))
                if msg == "User has not booked this item or booking is not completed")
        );
    }

    #[tokio::test]
    async fn comment_succeeds_after_completed_booking() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_has_completed_approved()
            .with(eq(20), eq(1), mockall::predicate::always())
            .returning(|_, _, _| Ok(true));
        let mut comments = MockCommentRepository::new();
        comments.expect_create().returning(|record| {
            Ok(Comment {
                id: 1,
                text: record.text,
                item_id: record.item_id,
                author_id: record.author_id,
                created: record.created,
            })
        });
        let mut items = MockItems::new();
        items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(1, 10, "Drill", true))));
        let mut users = MockUsers::new();
        users
            .expect_get_by_id()
            .returning(|id| Ok(Some(user(id, "Bob"))));

        let response = service(bookings, comments, items, users)
            .create_comment(20, 1, CreateComment {
                text: "Great drill".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.text, "Great drill");
        assert_eq!(response.author_name, "Bob");
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_before_any_lookup() {
        let bookings = MockBookingRepository::new();
        let comments = MockCommentRepository::new();
        let items = MockItems::new();
        let users = MockUsers::new();

        let result = service(bookings, comments, items, users)
            .create_comment(20, 1, CreateComment {
                text: "   ".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(BookingError::Validation(msg)) if msg == "Comment text is empty")
        );
    }
}
