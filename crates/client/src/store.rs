//! Local lists kept in step with the server.
//!
//! A [`Store`] holds the last list fetched for one resource. Mutations go to
//! the server first; the local list is only spliced once the server has
//! accepted the change, so a failed call leaves it untouched. Inputs are
//! checked against their validation schema before anything is sent.

use std::sync::Arc;

use lms_core::dto::content::{
    ContentItem, ContentListQuery, CreateContentRequest, UpdateContentRequest,
};
use lms_core::dto::course::{Course, CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use lms_core::dto::user::{CreateUserRequest, UpdateUserRequest, User, UserListQuery};
use lms_core::pagination::{paginate, Page, MAX_LIMIT};
use lms_core::stats::{
    content_stats, course_stats, user_stats, ContentStats, CourseStats, UserStats,
};
use lms_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::client::LmsClient;
use crate::error::ClientResult;

/// A list resource exposed by the API.
pub trait Resource {
    /// Collection path under `/api/v1`.
    const PATH: &'static str;
    /// Singular name used in log lines.
    const NAME: &'static str;

    type Item: DeserializeOwned + Clone + Send;
    type Create: Serialize + Validate + Sync;
    type Update: Serialize + Validate + Sync;
    type Query: Serialize + Sync;

    fn id(item: &Self::Item) -> DbId;

    /// Query used by [`Store::refresh`].
    fn full_listing() -> Self::Query;
}

pub struct Courses;

impl Resource for Courses {
    const PATH: &'static str = "/courses";
    const NAME: &'static str = "course";
    type Item = Course;
    type Create = CreateCourseRequest;
    type Update = UpdateCourseRequest;
    type Query = CourseListQuery;

    fn id(item: &Course) -> DbId {
        item.id
    }

    fn full_listing() -> CourseListQuery {
        CourseListQuery {
            limit: Some(MAX_LIMIT),
            ..Default::default()
        }
    }
}

pub struct Content;

impl Resource for Content {
    const PATH: &'static str = "/content";
    const NAME: &'static str = "content item";
    type Item = ContentItem;
    type Create = CreateContentRequest;
    type Update = UpdateContentRequest;
    type Query = ContentListQuery;

    fn id(item: &ContentItem) -> DbId {
        item.id
    }

    fn full_listing() -> ContentListQuery {
        ContentListQuery {
            limit: Some(MAX_LIMIT),
            ..Default::default()
        }
    }
}

pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "/users";
    const NAME: &'static str = "user";
    type Item = User;
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
    type Query = UserListQuery;

    fn id(item: &User) -> DbId {
        item.id
    }

    fn full_listing() -> UserListQuery {
        UserListQuery {
            limit: Some(MAX_LIMIT),
            ..Default::default()
        }
    }
}

pub type CourseStore = Store<Courses>;
pub type ContentStore = Store<Content>;
pub type UserStore = Store<Users>;

/// The last fetched list of `R`, newest first like the server returns it.
pub struct Store<R: Resource> {
    client: Arc<LmsClient>,
    items: Vec<R::Item>,
}

impl<R: Resource> Store<R> {
    pub fn new(client: Arc<LmsClient>) -> Self {
        Self {
            client,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&R::Item> {
        self.items.iter().find(|item| R::id(item) == id)
    }

    /// Replace the local list with the server's.
    pub async fn refresh(&mut self) -> ClientResult<&[R::Item]> {
        self.refresh_with(&R::full_listing()).await
    }

    /// Replace the local list with a filtered listing.
    pub async fn refresh_with(&mut self, query: &R::Query) -> ClientResult<&[R::Item]> {
        match self.client.get_with::<_, Vec<R::Item>>(R::PATH, query).await {
            Ok(items) => {
                self.items = items;
                Ok(&self.items)
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, error = %e, "Failed to load list");
                Err(e)
            }
        }
    }

    pub async fn add(&mut self, input: &R::Create) -> ClientResult<R::Item> {
        input.validate()?;
        match self.client.post::<_, R::Item>(R::PATH, input).await {
            Ok(item) => {
                self.items.insert(0, item.clone());
                Ok(item)
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, error = %e, "Failed to create");
                Err(e)
            }
        }
    }

    pub async fn update(&mut self, id: DbId, input: &R::Update) -> ClientResult<R::Item> {
        input.validate()?;
        let path = format!("{}/{id}", R::PATH);
        match self.client.put::<_, R::Item>(&path, input).await {
            Ok(item) => {
                match self.items.iter_mut().find(|existing| R::id(existing) == id) {
                    Some(slot) => *slot = item.clone(),
                    None => self.items.insert(0, item.clone()),
                }
                Ok(item)
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, id, error = %e, "Failed to update");
                Err(e)
            }
        }
    }

    pub async fn remove(&mut self, id: DbId) -> ClientResult<()> {
        let path = format!("{}/{id}", R::PATH);
        match self.client.delete(&path).await {
            Ok(()) => {
                self.items.retain(|item| R::id(item) != id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, id, error = %e, "Failed to delete");
                Err(e)
            }
        }
    }

    /// 1-based page of the local list.
    pub fn page(&self, page: usize, per_page: usize) -> Page<R::Item> {
        paginate(&self.items, page, per_page)
    }
}

impl Store<Courses> {
    pub fn stats(&self) -> CourseStats {
        course_stats(&self.items)
    }
}

impl Store<Content> {
    pub fn stats(&self) -> ContentStats {
        content_stats(&self.items)
    }
}

impl Store<Users> {
    pub fn stats(&self) -> UserStats {
        user_stats(&self.items)
    }
}
