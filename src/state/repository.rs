//! Data access seam between page state and the REST client.

use async_trait::async_trait;

use super::entity::{ChamadaLookup, Entity, PresencaLookup};
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Aluno, ChamadaMentor, Id, Mentor, Presenca, PresencaRapida, Turma};

/// CRUD operations for one entity collection.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    /// Auxiliary collections shown alongside the list.
    async fn lookup(&self) -> Result<E::Lookup> {
        Ok(E::Lookup::default())
    }

    async fn create(&self, payload: &E::Payload) -> Result<()>;

    async fn update(&self, id: Id, payload: &E::Payload) -> Result<()>;

    async fn remove(&self, id: Id) -> Result<()>;
}

/// One-click attendance registration.
#[async_trait]
pub trait AttendanceActions: Send + Sync {
    async fn quick_register(&self, request: PresencaRapida) -> Result<()>;
}

/// Bring a soft-deleted mentor back.
#[async_trait]
pub trait MentorActions: Send + Sync {
    async fn reactivate(&self, id: Id) -> Result<()>;
}

#[async_trait]
impl Repository<Turma> for ApiClient {
    async fn list(&self) -> Result<Vec<Turma>> {
        self.listar_turmas().await
    }

    async fn create(&self, payload: &<Turma as Entity>::Payload) -> Result<()> {
        self.criar_turma(payload).await.map(|_| ())
    }

    async fn update(&self, id: Id, payload: &<Turma as Entity>::Payload) -> Result<()> {
        self.atualizar_turma(id, payload).await.map(|_| ())
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.remover_turma(id).await
    }
}

#[async_trait]
impl Repository<Aluno> for ApiClient {
    async fn list(&self) -> Result<Vec<Aluno>> {
        self.listar_alunos().await
    }

    /// Every class, so students of a deactivated class keep its name.
    async fn lookup(&self) -> Result<Vec<Turma>> {
        self.listar_todas_turmas().await
    }

    async fn create(&self, payload: &<Aluno as Entity>::Payload) -> Result<()> {
        self.criar_aluno(payload).await.map(|_| ())
    }

    async fn update(&self, id: Id, payload: &<Aluno as Entity>::Payload) -> Result<()> {
        self.atualizar_aluno(id, payload).await.map(|_| ())
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.remover_aluno(id).await
    }
}

#[async_trait]
impl Repository<Presenca> for ApiClient {
    async fn list(&self) -> Result<Vec<Presenca>> {
        self.listar_presencas().await
    }

    /// Attendance outlives soft deletion, so names are resolved against
    /// every class and student. Selectors narrow these to active ones.
    async fn lookup(&self) -> Result<PresencaLookup> {
        let (turmas, alunos) = tokio::try_join!(self.listar_todas_turmas(), self.listar_todos_alunos())?;
        Ok(PresencaLookup { turmas, alunos })
    }

    async fn create(&self, payload: &<Presenca as Entity>::Payload) -> Result<()> {
        self.registrar_presenca(payload).await.map(|_| ())
    }

    async fn update(&self, id: Id, payload: &<Presenca as Entity>::Payload) -> Result<()> {
        self.atualizar_presenca(id, payload).await.map(|_| ())
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.remover_presenca(id).await
    }
}

#[async_trait]
impl Repository<Mentor> for ApiClient {
    /// Inactive mentors are listed too so they can be reactivated.
    async fn list(&self) -> Result<Vec<Mentor>> {
        self.listar_todos_mentores().await
    }

    async fn create(&self, payload: &<Mentor as Entity>::Payload) -> Result<()> {
        self.criar_mentor(payload).await.map(|_| ())
    }

    async fn update(&self, id: Id, payload: &<Mentor as Entity>::Payload) -> Result<()> {
        self.atualizar_mentor(id, payload).await.map(|_| ())
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.remover_mentor(id).await
    }
}

#[async_trait]
impl Repository<ChamadaMentor> for ApiClient {
    async fn list(&self) -> Result<Vec<ChamadaMentor>> {
        self.listar_chamadas().await
    }

    async fn lookup(&self) -> Result<ChamadaLookup> {
        let (mentores, estatisticas) = tokio::try_join!(self.listar_mentores_ativos(), self.estatisticas_chamadas())?;
        Ok(ChamadaLookup { mentores, estatisticas })
    }

    async fn create(&self, payload: &<ChamadaMentor as Entity>::Payload) -> Result<()> {
        self.criar_chamada(payload).await.map(|_| ())
    }

    async fn update(&self, id: Id, payload: &<ChamadaMentor as Entity>::Payload) -> Result<()> {
        self.atualizar_chamada(id, payload).await.map(|_| ())
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.remover_chamada(id).await
    }
}

#[async_trait]
impl AttendanceActions for ApiClient {
    async fn quick_register(&self, request: PresencaRapida) -> Result<()> {
        self.registrar_presenca_rapida(request).await.map(|_| ())
    }
}

#[async_trait]
impl MentorActions for ApiClient {
    async fn reactivate(&self, id: Id) -> Result<()> {
        tracing::info!("Reactivating mentor {id}");
        self.reativar_mentor(id).await.map(|_| ())
    }
}
