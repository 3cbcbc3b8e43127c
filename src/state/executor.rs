//! Runs page commands against a repository, honoring cancellation.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::entity::Entity;
use super::list::{Command, Event};
use super::repository::{AttendanceActions, Repository};
use crate::error::{AppError, Result};
use crate::models::PresencaRapida;

/// Run one command. A token cancelled before or during the call yields
/// [`Event::Cancelled`]; a token already cancelled issues no request.
pub async fn execute<E, R>(repo: &R, command: Command<E>, token: &CancellationToken) -> Event<E>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    match cancellable(token, run(repo, command)).await {
        Ok(event) => event,
        Err(_) => Event::Cancelled,
    }
}

/// Race a future against a cancellation token, checking the token first.
pub async fn cancellable<T, F>(token: &CancellationToken, future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        value = future => Ok(value),
    }
}

/// Register one student present right now. Each call sends its own
/// request; repeated clicks are not merged.
pub async fn register_now<A>(actions: &A, request: PresencaRapida, token: &CancellationToken) -> Result<()>
where
    A: AttendanceActions + ?Sized,
{
    cancellable(token, actions.quick_register(request)).await?
}

async fn run<E, R>(repo: &R, command: Command<E>) -> Event<E>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    match command {
        Command::Load => match tokio::try_join!(repo.list(), repo.lookup()) {
            Ok((records, lookup)) => {
                tracing::debug!("Loaded {} {}", records.len(), E::PLURAL);
                Event::Loaded { records, lookup }
            }
            Err(e) => Event::LoadFailed(e),
        },
        Command::Create(payload) => match repo.create(&payload).await {
            Ok(()) => {
                tracing::info!("{} created", E::NOUN);
                Event::Saved
            }
            Err(e) => Event::SaveFailed(e),
        },
        Command::Update(id, payload) => match repo.update(id, &payload).await {
            Ok(()) => {
                tracing::info!("{} {id} updated", E::NOUN);
                Event::Saved
            }
            Err(e) => Event::SaveFailed(e),
        },
        Command::Delete(id) => match repo.remove(id).await {
            Ok(()) => {
                tracing::info!("{} {id} removed", E::NOUN);
                Event::Deleted
            }
            Err(e) => Event::DeleteFailed(e),
        },
    }
}
