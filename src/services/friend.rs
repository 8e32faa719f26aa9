//! Friend services - Gestione inviti di amicizia e lista amici
//!
//! Ciclo di vita di un invito: `PENDING -> ACCEPTED` oppure `PENDING -> REJECTED`,
//! entrambi terminali. Può esistere un solo invito Pending per coppia non ordinata
//! di utenti; solo il mittente può inviarlo e solo il destinatario può rispondere.

use crate::core::{AppError, AppState};
use crate::dtos::{
    CreateFriendInviteDTO, EnrichedFriendInviteDTO, FriendDTO, FriendInviteDTO, UserDTO,
    UserInviteDTO,
};
use crate::entities::{FriendInvite, InviteStatus, User};
use axum::{
    Extension,
    extract::{Json, State},
};
use futures::future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, sender = %body.user_sender_id, receiver = %body.user_receiver_id))]
pub async fn send_friend_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<UserInviteDTO>,
) -> Result<Json<FriendInviteDTO>, AppError> {
    debug!("Sending friend invite");
    // 1. Validare il body (id positivi)
    // 2. Verificare che current_user sia il mittente (si invita solo per conto proprio)
    // 3. Rifiutare l'auto-invito
    // 4. Verificare che il destinatario esista
    // 5. Creare l'invito: lo store controlla e inserisce in un unico passo atomico.
    //    Un invito Pending già presente per la coppia (in qualsiasi direzione) oppure
    //    un'amicizia già registrata danno FORBIDDEN
    // 6. Ritornare l'invito creato

    body.validate()?;

    if body.user_sender_id != current_user.user_id {
        warn!(
            "User {} attempted to send an invite on behalf of user {}",
            current_user.user_id, body.user_sender_id
        );
        return Err(AppError::forbidden(
            "You can only send friend invites on your own behalf",
        ));
    }

    if body.user_sender_id == body.user_receiver_id {
        warn!("User attempted to invite themselves");
        return Err(AppError::bad_request("You cannot send a friend invite to yourself"));
    }

    if state.user.read(&body.user_receiver_id).await?.is_none() {
        warn!("Receiver not found: {}", body.user_receiver_id);
        return Err(AppError::not_found("User not found"));
    }

    let invite = state
        .invite
        .create(&CreateFriendInviteDTO::from(body))
        .await
        .inspect_err(|_| warn!("Friend invite rejected by store"))?;

    info!("Friend invite {} created", invite.invite_id);
    Ok(Json(FriendInviteDTO::from(invite)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn accept_friend_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UserInviteDTO>,
) -> Result<Json<FriendInviteDTO>, AppError> {
    respond_to_friend_invite(&state, &current_user, body, InviteStatus::Accepted).await
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn reject_friend_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UserInviteDTO>,
) -> Result<Json<FriendInviteDTO>, AppError> {
    respond_to_friend_invite(&state, &current_user, body, InviteStatus::Rejected).await
}

async fn respond_to_friend_invite(
    state: &AppState,
    current_user: &User,
    body: UserInviteDTO,
    new_status: InviteStatus,
) -> Result<Json<FriendInviteDTO>, AppError> {
    debug!(
        "Responding {} to invite {} -> {}",
        new_status, body.user_sender_id, body.user_receiver_id
    );
    // 1. Validare il body
    // 2. Verificare che current_user sia il destinatario, altrimenti FORBIDDEN
    // 3. Risolvere l'invito Pending mittente -> destinatario (compare-and-swap nello store);
    //    se accettato lo store registra anche l'amicizia nello stesso passo
    // 4. NOT_FOUND se non c'è alcun invito Pending in quella direzione

    body.validate()?;

    if body.user_receiver_id != current_user.user_id {
        warn!(
            "User {} attempted to respond to an invite addressed to user {}",
            current_user.user_id, body.user_receiver_id
        );
        return Err(AppError::forbidden(
            "You are not the recipient of this friend invite",
        ));
    }

    let invite = state
        .invite
        .resolve(body.user_sender_id, body.user_receiver_id, new_status)
        .await
        .map_err(|e| {
            warn!("Unable to resolve friend invite: {}", e);
            AppError::from(e)
        })?;

    info!("Friend invite {} is now {}", invite.invite_id, invite.status);
    Ok(Json(FriendInviteDTO::from(invite)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_pending_invites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<EnrichedFriendInviteDTO>>, AppError> {
    debug!("Listing incoming friend invites");
    let invites = state
        .invite
        .find_incoming_pending(current_user.user_id)
        .await?;

    info!("Found {} pending invites", invites.len());
    Ok(Json(enrich_invites(&state, invites).await?))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_sent_invites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<EnrichedFriendInviteDTO>>, AppError> {
    debug!("Listing outgoing friend invites");
    let invites = state
        .invite
        .find_outgoing_pending(current_user.user_id)
        .await?;

    info!("Found {} sent invites", invites.len());
    Ok(Json(enrich_invites(&state, invites).await?))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<FriendDTO>>, AppError> {
    debug!("Listing friends");
    let friendships = state
        .friendship
        .find_many_by_user_id(current_user.user_id)
        .await?;

    // Recupera gli utenti amici con query parallele
    let lookups = friendships.iter().filter_map(|friendship| {
        let friend_id = friendship.other(current_user.user_id)?;
        let state = &state;
        Some(async move {
            let user = state.user.read(&friend_id).await?;
            Ok::<_, AppError>(user.map(|user| FriendDTO {
                user: UserDTO::from(user),
                friends_since: friendship.since,
            }))
        })
    });
    let friends: Vec<FriendDTO> = future::try_join_all(lookups)
        .await?
        .into_iter()
        .flatten()
        .collect();

    info!("Found {} friends", friends.len());
    Ok(Json(friends))
}

/// Arricchisce gli inviti con i dati di mittente e destinatario
async fn enrich_invites(
    state: &AppState,
    invites: Vec<FriendInvite>,
) -> Result<Vec<EnrichedFriendInviteDTO>, AppError> {
    let mut enriched = Vec::with_capacity(invites.len());
    for invite in invites {
        let (sender, receiver) = future::try_join(
            state.user.read(&invite.sender_id),
            state.user.read(&invite.receiver_id),
        )
        .await?;

        enriched.push(EnrichedFriendInviteDTO {
            invite_id: invite.invite_id,
            status: invite.status,
            created_at: invite.created_at,
            sender: sender.map(UserDTO::from),
            receiver: receiver.map(UserDTO::from),
        });
    }
    Ok(enriched)
}
