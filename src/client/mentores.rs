//! `/mentores` endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Id, Mentor, MentorPayload, TipoMentor};

impl ApiClient {
    pub async fn listar_mentores(&self) -> Result<Vec<Mentor>> {
        self.fetch_list(self.get(&["mentores"])?).await
    }

    /// Every mentor, including inactive ones.
    pub async fn listar_todos_mentores(&self) -> Result<Vec<Mentor>> {
        self.fetch_list(self.get(&["mentores", "todos"])?).await
    }

    pub async fn listar_mentores_ativos(&self) -> Result<Vec<Mentor>> {
        self.fetch_list(self.get(&["mentores", "ativos"])?).await
    }

    pub async fn listar_mentores_por_tipo(&self, tipo: TipoMentor) -> Result<Vec<Mentor>> {
        self.fetch_list(self.get(&["mentores", "tipo", tipo.code()])?).await
    }

    pub async fn buscar_mentor(&self, id: Id) -> Result<Option<Mentor>> {
        self.fetch_one(self.get(&["mentores", &id.to_string()])?).await
    }

    pub async fn buscar_mentor_por_email(&self, email: &str) -> Result<Option<Mentor>> {
        self.fetch_one(self.get(&["mentores", "email", email])?).await
    }

    /// Fails with HTTP 400 when the email is already taken.
    pub async fn criar_mentor(&self, mentor: &MentorPayload) -> Result<Option<Mentor>> {
        self.fetch_one(self.post(&["mentores"], mentor)?).await
    }

    pub async fn atualizar_mentor(&self, id: Id, mentor: &MentorPayload) -> Result<Option<Mentor>> {
        self.fetch_one(self.put(&["mentores", &id.to_string()], mentor)?).await
    }

    /// Soft delete: the mentor is marked inactive.
    pub async fn remover_mentor(&self, id: Id) -> Result<()> {
        self.fetch_unit(self.delete(&["mentores", &id.to_string()])?).await
    }

    pub async fn reativar_mentor(&self, id: Id) -> Result<Option<Mentor>> {
        self.fetch_one(self.put_empty(&["mentores", &id.to_string(), "reativar"])?)
            .await
    }
}
