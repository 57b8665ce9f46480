//! Database repository for CRUD operations.
//!
//! Uses prepared statements and parameter binding for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    ContactMessage, CreateContactMessageRequest, CreateEventRequest, CreatePublicationRequest,
    CreateTopicRequest, Event, ForumCategory, ForumTopic, GalleryItem, Profile, ProfileRecord,
    Publication, Role, UpdateProfileRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PROFILE OPERATIONS ====================

    /// List all member profiles for the public directory.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let rows = sqlx::query(
            "SELECT id, username, full_name, bio, academic_info, avatar_url, lattes_url, role, created_at FROM profiles ORDER BY full_name"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(profile_from_row).collect()
    }

    /// Get a profile by ID.
    pub async fn get_profile(&self, id: &str) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, full_name, bio, academic_info, avatar_url, lattes_url, role, created_at FROM profiles WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    /// Get a profile with its credential columns by e-mail, for sign-in.
    pub async fn get_profile_record_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ProfileRecord>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, full_name, bio, academic_info, avatar_url, lattes_url, role, created_at FROM profiles WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(ProfileRecord {
                profile: profile_from_row(&row)?,
                email: row.get("email"),
                password_hash: row.get("password_hash"),
            })
        })
        .transpose()
    }

    /// Whether a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 FROM profiles WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Create a new profile with its credentials.
    pub async fn create_profile(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
        username: &str,
        role: Role,
    ) -> Result<Profile, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO profiles (id, username, email, password_hash, full_name, role, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .bind(role.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Profile {
            id,
            username: username.to_string(),
            full_name: full_name.to_string(),
            bio: None,
            academic_info: None,
            role,
            avatar_url: None,
            lattes_url: None,
            created_at: now,
        })
    }

    /// Update the mutable fields of a profile. Missing fields keep their
    /// current value.
    pub async fn update_profile(
        &self,
        id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Profile, AppError> {
        let existing = self
            .get_profile(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))?;

        let full_name = request.full_name.as_ref().unwrap_or(&existing.full_name);
        let bio = request.bio.clone().or(existing.bio.clone());
        let academic_info = request
            .academic_info
            .clone()
            .or(existing.academic_info.clone());
        let avatar_url = request.avatar_url.clone().or(existing.avatar_url.clone());
        let lattes_url = request.lattes_url.clone().or(existing.lattes_url.clone());

        sqlx::query(
            "UPDATE profiles SET full_name = ?, bio = ?, academic_info = ?, avatar_url = ?, lattes_url = ? WHERE id = ?"
        )
        .bind(full_name)
        .bind(&bio)
        .bind(&academic_info)
        .bind(&avatar_url)
        .bind(&lattes_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Profile {
            id: id.to_string(),
            username: existing.username,
            full_name: full_name.clone(),
            bio,
            academic_info,
            role: existing.role,
            avatar_url,
            lattes_url,
            created_at: existing.created_at,
        })
    }

    // ==================== PUBLICATION OPERATIONS ====================

    /// List all publications, newest first.
    pub async fn list_publications(&self) -> Result<Vec<Publication>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, author_id, author_name, abstract, link, category, created_at FROM publications ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(publication_from_row).collect())
    }

    /// Create a new publication authored by the given profile.
    pub async fn create_publication(
        &self,
        request: &CreatePublicationRequest,
        author: &Profile,
    ) -> Result<Publication, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO publications (id, title, author_id, author_name, abstract, link, category, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&author.id)
        .bind(&author.full_name)
        .bind(&request.r#abstract)
        .bind(&request.link)
        .bind(&request.category)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Publication {
            id,
            title: request.title.clone(),
            author_id: author.id.clone(),
            author_name: author.full_name.clone(),
            r#abstract: request.r#abstract.clone(),
            link: request.link.clone(),
            category: request.category.clone(),
            created_at: now,
        })
    }

    // ==================== EVENT OPERATIONS ====================

    /// List all events, oldest first by date.
    pub async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, description, date, time, meeting_link, created_at FROM events ORDER BY date ASC, time ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(event_from_row).collect())
    }

    /// Create a new event.
    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<Event, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO events (id, title, description, date, time, meeting_link, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.date)
        .bind(&request.time)
        .bind(&request.meeting_link)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Event {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            date: request.date.clone(),
            time: request.time.clone(),
            meeting_link: request.meeting_link.clone(),
            created_at: now,
        })
    }

    /// Delete an event.
    pub async fn delete_event(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Event {} not found", id)));
        }

        Ok(())
    }

    // ==================== FORUM OPERATIONS ====================

    /// List forum topics, newest first, optionally filtered by category.
    pub async fn list_topics(
        &self,
        category: Option<ForumCategory>,
    ) -> Result<Vec<ForumTopic>, AppError> {
        let rows = match category {
            Some(category) => {
                sqlx::query(
                    "SELECT id, category, title, author_id, author_name, content, created_at FROM forum_topics WHERE category = ? ORDER BY created_at DESC"
                )
                .bind(category.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, category, title, author_id, author_name, content, created_at FROM forum_topics ORDER BY created_at DESC"
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(topic_from_row).collect()
    }

    /// Create a new forum topic authored by the given profile.
    pub async fn create_topic(
        &self,
        request: &CreateTopicRequest,
        author: &Profile,
    ) -> Result<ForumTopic, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO forum_topics (id, category, title, author_id, author_name, content, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(request.category.as_str())
        .bind(&request.title)
        .bind(&author.id)
        .bind(&author.full_name)
        .bind(&request.content)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(ForumTopic {
            id,
            category: request.category,
            title: request.title.clone(),
            author_id: author.id.clone(),
            author_name: author.full_name.clone(),
            content: request.content.clone(),
            created_at: now,
        })
    }

    // ==================== GALLERY OPERATIONS ====================

    /// List gallery items, newest first.
    pub async fn list_gallery_items(&self) -> Result<Vec<GalleryItem>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, image_url, created_at FROM gallery_items ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(gallery_item_from_row).collect())
    }

    // ==================== CONTACT MESSAGE OPERATIONS ====================

    /// List contact messages, newest first.
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, message, is_read, created_at FROM contact_messages ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_message_from_row).collect())
    }

    /// Store a message from the public contact form.
    pub async fn create_contact_message(
        &self,
        request: &CreateContactMessageRequest,
    ) -> Result<ContactMessage, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, message, is_read, created_at) VALUES (?, ?, ?, ?, 0, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.message)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(ContactMessage {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            message: request.message.clone(),
            is_read: false,
            created_at: now,
        })
    }

    /// Mark a contact message as read.
    pub async fn mark_message_read(&self, id: &str) -> Result<ContactMessage, AppError> {
        let result = sqlx::query("UPDATE contact_messages SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        let row = sqlx::query(
            "SELECT id, name, email, message, is_read, created_at FROM contact_messages WHERE id = ?"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact_message_from_row(&row))
    }
}

// Helper functions for row conversion

fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, AppError> {
    let role_str: String = row.get("role");
    let role = Role::from_str(&role_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", role_str)))?;

    Ok(Profile {
        id: row.get("id"),
        username: row.get("username"),
        full_name: row.get("full_name"),
        bio: row.get("bio"),
        academic_info: row.get("academic_info"),
        role,
        avatar_url: row.get("avatar_url"),
        lattes_url: row.get("lattes_url"),
        created_at: row.get("created_at"),
    })
}

fn publication_from_row(row: &sqlx::sqlite::SqliteRow) -> Publication {
    Publication {
        id: row.get("id"),
        title: row.get("title"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        r#abstract: row.get("abstract"),
        link: row.get("link"),
        category: row.get("category"),
        created_at: row.get("created_at"),
    }
}

fn event_from_row(row: &sqlx::sqlite::SqliteRow) -> Event {
    Event {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        date: row.get("date"),
        time: row.get("time"),
        meeting_link: row.get("meeting_link"),
        created_at: row.get("created_at"),
    }
}

fn topic_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ForumTopic, AppError> {
    let category_str: String = row.get("category");
    let category = ForumCategory::from_str(&category_str).ok_or_else(|| {
        AppError::Internal(format!("Unknown forum category in database: {}", category_str))
    })?;

    Ok(ForumTopic {
        id: row.get("id"),
        category,
        title: row.get("title"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    })
}

fn gallery_item_from_row(row: &sqlx::sqlite::SqliteRow) -> GalleryItem {
    GalleryItem {
        id: row.get("id"),
        title: row.get("title"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    }
}

fn contact_message_from_row(row: &sqlx::sqlite::SqliteRow) -> ContactMessage {
    let is_read: i32 = row.get("is_read");
    ContactMessage {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        message: row.get("message"),
        is_read: is_read != 0,
        created_at: row.get("created_at"),
    }
}
