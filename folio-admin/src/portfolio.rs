//! Portfolio operations on top of the backend clients.
//!
//! Reads go out with the anon key. Writes need a session from
//! [`Portfolio::sign_in`]; without one they fail with
//! [`BackendError::NotSignedIn`] before any request is made.

use folio_shared::{
    ContactMessage, ImageUpload, NewProject, NewSkill, Project, ProjectPatch, Session, Skill,
    User, ValidationError, MESSAGES_TABLE, PROJECTS_TABLE, SKILLS_TABLE, THUMBNAIL_BUCKET,
};

use crate::client::Backend;
use crate::error::{BackendError, Result};
use crate::table::{Filter, Order};

pub struct Portfolio {
    backend: Backend,
    session: Option<Session>,
}

impl Portfolio {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            session: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session> {
        let session = self.backend.auth().sign_in(email, password).await?;
        Ok(&*self.session.insert(session))
    }

    /// Drop the local session and revoke it remotely. The local session is
    /// gone even when revocation fails.
    pub async fn sign_out(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => self.backend.auth().sign_out(&session).await,
            None => Ok(()),
        }
    }

    pub async fn whoami(&self) -> Result<User> {
        let session = self.require_session()?;
        self.backend.auth().current_user(session).await
    }

    /// All projects, newest first
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.backend
            .tables(None)
            .select(PROJECTS_TABLE, &[], Some(&Order::desc("created_at")))
            .await
    }

    pub async fn project(&self, id: &str) -> Result<Project> {
        self.backend
            .tables(None)
            .select::<Project>(PROJECTS_TABLE, &[Filter::eq("id", id)], None)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("project {id}")))
    }

    /// All skills, oldest first
    pub async fn skills(&self) -> Result<Vec<Skill>> {
        self.backend
            .tables(None)
            .select(SKILLS_TABLE, &[], Some(&Order::asc("created_at")))
            .await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        let session = self.require_session()?;
        project.validate()?;

        let created: Project = self
            .backend
            .tables(Some(session))
            .insert(PROJECTS_TABLE, project)
            .await?;
        log::info!("Created project {} ({})", created.title, created.id);
        Ok(created)
    }

    pub async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Project> {
        let session = self.require_session()?;
        if patch.is_empty() {
            return Err(ValidationError::Empty { field: "patch" }.into());
        }

        let updated: Project = self
            .backend
            .tables(Some(session))
            .update(PROJECTS_TABLE, id, patch)
            .await?;
        log::info!("Updated project {}", updated.id);
        Ok(updated)
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        let session = self.require_session()?;
        self.backend
            .tables(Some(session))
            .delete(PROJECTS_TABLE, id)
            .await?;
        log::info!("Deleted project {}", id);
        Ok(())
    }

    pub async fn create_skill(&self, skill: &NewSkill) -> Result<Skill> {
        let session = self.require_session()?;
        let created: Skill = self
            .backend
            .tables(Some(session))
            .insert(SKILLS_TABLE, skill)
            .await?;
        log::info!("Created skill {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn delete_skill(&self, id: &str) -> Result<()> {
        let session = self.require_session()?;
        self.backend
            .tables(Some(session))
            .delete(SKILLS_TABLE, id)
            .await?;
        log::info!("Deleted skill {}", id);
        Ok(())
    }

    /// Public contact form; no session needed.
    pub async fn send_message(&self, message: &ContactMessage) -> Result<()> {
        message.validate()?;
        self.backend
            .tables(None)
            .insert_minimal(MESSAGES_TABLE, message)
            .await?;
        log::info!("Sent contact message from {}", message.email);
        Ok(())
    }

    /// Store a project thumbnail and return its public URL.
    pub async fn upload_thumbnail(&self, upload: &ImageUpload) -> Result<String> {
        let session = self.require_session()?;
        let path = upload.object_path();
        let storage = self.backend.storage(Some(session));

        storage
            .upload(
                THUMBNAIL_BUCKET,
                &path,
                upload.bytes.clone(),
                &upload.content_type,
            )
            .await?;
        Ok(storage.public_url(THUMBNAIL_BUCKET, &path))
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(BackendError::NotSignedIn)
    }
}
