//! MemoryStore - Store in memoria basato su DashMap
//!
//! Implementa tutti i trait di persistenza in un'unica struct, così l'accettazione di un
//! invito e la creazione dell'amicizia avvengono nello stesso passo atomico.
//! Usato dai test di integrazione e quando `STORAGE=memory`.
//!
//! L'indice `pending` (coppia non ordinata -> invite_id) è il punto di serializzazione:
//! ogni operazione che crea o risolve un invito tiene la entry della coppia per tutta
//! la sua durata.

use super::{Create, FriendInviteStore, FriendshipStore, Read, StoreError, UserStore};
use crate::dtos::{CreateFriendInviteDTO, CreateUserDTO};
use crate::entities::{FriendInvite, Friendship, InviteStatus, User, unordered_pair};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MemoryStore {
    users: DashMap<i64, User>,
    usernames: DashMap<String, i64>,
    invites: DashMap<i64, FriendInvite>,
    pending: DashMap<(i64, i64), i64>,
    friendships: DashMap<(i64, i64), Friendship>,
    next_user_id: AtomicI64,
    next_invite_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            invites: DashMap::new(),
            pending: DashMap::new(),
            friendships: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_invite_id: AtomicI64::new(1),
        }
    }

    /// Numero totale di inviti salvati, in qualsiasi stato
    pub fn invite_count(&self) -> usize {
        self.invites.len()
    }

    fn collect_pending<F>(&self, filter: F) -> Vec<FriendInvite>
    where
        F: Fn(&FriendInvite) -> bool,
    {
        let mut invites: Vec<FriendInvite> = self
            .invites
            .iter()
            .filter(|entry| entry.status == InviteStatus::Pending && filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        invites.sort_by_key(|invite| invite.invite_id);
        invites
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Create<User, CreateUserDTO> for MemoryStore {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, StoreError> {
        match self.usernames.entry(data.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::UsernameTaken),
            Entry::Vacant(slot) => {
                let user = User {
                    user_id: self.next_user_id.fetch_add(1, Ordering::SeqCst),
                    username: data.username.clone(),
                    password: data.password.clone(),
                };
                self.users.insert(user.user_id, user.clone());
                slot.insert(user.user_id);
                Ok(user)
            }
        }
    }
}

#[async_trait]
impl Read<User, i64> for MemoryStore {
    async fn read(&self, id: &i64) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(id).map(|user| user.clone()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user_id = match self.usernames.get(username) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.users.get(&user_id).map(|user| user.clone()))
    }
}

#[async_trait]
impl Create<FriendInvite, CreateFriendInviteDTO> for MemoryStore {
    async fn create(&self, data: &CreateFriendInviteDTO) -> Result<FriendInvite, StoreError> {
        let pair = unordered_pair(data.sender_id, data.receiver_id);
        match self.pending.entry(pair) {
            Entry::Occupied(_) => Err(StoreError::DuplicatePending),
            // resolve registra l'amicizia tenendo questa stessa entry: il controllo è atomico
            Entry::Vacant(_) if self.friendships.contains_key(&pair) => {
                Err(StoreError::AlreadyFriends)
            }
            Entry::Vacant(slot) => {
                let invite = FriendInvite {
                    invite_id: self.next_invite_id.fetch_add(1, Ordering::SeqCst),
                    sender_id: data.sender_id,
                    receiver_id: data.receiver_id,
                    status: InviteStatus::Pending,
                    created_at: Utc::now(),
                    resolved_at: None,
                };
                self.invites.insert(invite.invite_id, invite.clone());
                slot.insert(invite.invite_id);
                Ok(invite)
            }
        }
    }
}

#[async_trait]
impl FriendInviteStore for MemoryStore {
    async fn resolve(
        &self,
        sender_id: i64,
        receiver_id: i64,
        new_status: InviteStatus,
    ) -> Result<FriendInvite, StoreError> {
        let pair = unordered_pair(sender_id, receiver_id);
        let slot = match self.pending.entry(pair) {
            Entry::Occupied(slot) => slot,
            Entry::Vacant(_) => return Err(StoreError::NotFound),
        };

        let resolved = {
            let mut invite = self
                .invites
                .get_mut(slot.get())
                .ok_or(StoreError::NotFound)?;
            // la coppia ha un invito Pending, ma nella direzione opposta
            if !invite.is_directed(sender_id, receiver_id) {
                return Err(StoreError::NotFound);
            }
            let now = Utc::now();
            invite.status = new_status;
            invite.resolved_at = Some(now);
            invite.clone()
        };

        if new_status == InviteStatus::Accepted {
            let since = resolved.resolved_at.unwrap_or_else(Utc::now);
            self.friendships
                .entry(pair)
                .or_insert_with(|| Friendship::new(sender_id, receiver_id, since));
        }

        if new_status.is_terminal() {
            slot.remove();
        }
        Ok(resolved)
    }

    async fn find_incoming_pending(&self, user_id: i64) -> Result<Vec<FriendInvite>, StoreError> {
        Ok(self.collect_pending(|invite| invite.receiver_id == user_id))
    }

    async fn find_outgoing_pending(&self, user_id: i64) -> Result<Vec<FriendInvite>, StoreError> {
        Ok(self.collect_pending(|invite| invite.sender_id == user_id))
    }
}

#[async_trait]
impl FriendshipStore for MemoryStore {
    async fn find_many_by_user_id(&self, user_id: i64) -> Result<Vec<Friendship>, StoreError> {
        let mut friendships: Vec<Friendship> = self
            .friendships
            .iter()
            .filter(|entry| entry.other(user_id).is_some())
            .map(|entry| entry.value().clone())
            .collect();
        friendships.sort_by_key(|friendship| friendship.since);
        Ok(friendships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn invite(sender_id: i64, receiver_id: i64) -> CreateFriendInviteDTO {
        CreateFriendInviteDTO {
            sender_id,
            receiver_id,
        }
    }

    fn invites(store: &Arc<MemoryStore>) -> Arc<dyn FriendInviteStore> {
        store.clone()
    }

    fn friendships(store: &Arc<MemoryStore>) -> Arc<dyn FriendshipStore> {
        store.clone()
    }

    #[tokio::test]
    async fn user_ids_are_sequential_and_usernames_unique() {
        let store = Arc::new(MemoryStore::new());
        let users: Arc<dyn UserStore> = store.clone();
        let dto = |name: &str| CreateUserDTO {
            username: name.to_string(),
            password: "hash".to_string(),
        };

        assert_eq!(users.create(&dto("alice")).await.unwrap().user_id, 1);
        assert_eq!(users.create(&dto("bob")).await.unwrap().user_id, 2);
        assert!(matches!(
            users.create(&dto("alice")).await,
            Err(StoreError::UsernameTaken)
        ));
        assert_eq!(
            users.find_by_username("bob").await.unwrap().unwrap().user_id,
            2
        );
    }

    #[tokio::test]
    async fn duplicate_pending_is_rejected_in_both_directions() {
        let store = Arc::new(MemoryStore::new());
        let invites = invites(&store);

        invites.create(&invite(1, 2)).await.unwrap();
        assert!(matches!(
            invites.create(&invite(1, 2)).await,
            Err(StoreError::DuplicatePending)
        ));
        assert!(matches!(
            invites.create(&invite(2, 1)).await,
            Err(StoreError::DuplicatePending)
        ));
        assert_eq!(store.invite_count(), 1);
    }

    #[tokio::test]
    async fn accept_creates_symmetric_friendship() {
        let store = Arc::new(MemoryStore::new());
        let invites = invites(&store);
        let friendships = friendships(&store);

        invites.create(&invite(1, 2)).await.unwrap();
        let accepted = invites
            .resolve(1, 2, InviteStatus::Accepted)
            .await
            .unwrap();

        assert_eq!(accepted.status, InviteStatus::Accepted);
        assert!(accepted.resolved_at.is_some());
        assert!(store.friendships.contains_key(&unordered_pair(2, 1)));
        assert_eq!(friendships.find_many_by_user_id(1).await.unwrap().len(), 1);
        assert!(store.pending.is_empty());
        assert_eq!(friendships.find_many_by_user_id(2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reject_frees_the_pair_without_friendship() {
        let store = Arc::new(MemoryStore::new());
        let invites = invites(&store);
        let friendships = friendships(&store);

        let first = invites.create(&invite(1, 2)).await.unwrap();
        invites
            .resolve(1, 2, InviteStatus::Rejected)
            .await
            .unwrap();

        assert!(friendships.find_many_by_user_id(1).await.unwrap().is_empty());
        let stored = store.invites.get(&first.invite_id).unwrap().clone();
        assert_eq!(stored.status, InviteStatus::Rejected);

        // dopo il rifiuto la coppia può ricevere un nuovo invito
        let second = invites.create(&invite(2, 1)).await.unwrap();
        assert_ne!(first.invite_id, second.invite_id);
    }

    #[tokio::test]
    async fn invite_between_friends_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let invites = invites(&store);

        invites.create(&invite(1, 2)).await.unwrap();
        invites
            .resolve(1, 2, InviteStatus::Accepted)
            .await
            .unwrap();

        assert!(matches!(
            invites.create(&invite(2, 1)).await,
            Err(StoreError::AlreadyFriends)
        ));
        assert!(matches!(
            invites.create(&invite(1, 2)).await,
            Err(StoreError::AlreadyFriends)
        ));
        assert!(store.pending.is_empty());
        assert_eq!(store.invite_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn reverse_send_racing_accept_never_leaves_pending_between_friends() {
        for _ in 0..50 {
            let store = Arc::new(MemoryStore::new());
            invites(&store).create(&invite(1, 2)).await.unwrap();

            let accepting = invites(&store);
            let sending = invites(&store);
            let accept = tokio::spawn(async move {
                accepting.resolve(1, 2, InviteStatus::Accepted).await
            });
            let send = tokio::spawn(async move { sending.create(&invite(2, 1)).await });

            accept.await.unwrap().unwrap();
            let sent = send.await.unwrap();

            // o il pending era ancora occupato, o l'amicizia era già registrata
            assert!(matches!(
                sent,
                Err(StoreError::DuplicatePending) | Err(StoreError::AlreadyFriends)
            ));
            assert!(store.pending.is_empty());
            assert!(store.friendships.contains_key(&(1, 2)));
        }
    }

    #[tokio::test]
    async fn resolve_requires_a_pending_invite_in_that_direction() {
        let store = Arc::new(MemoryStore::new());
        let invites = invites(&store);

        assert!(matches!(
            invites.resolve(1, 2, InviteStatus::Accepted).await,
            Err(StoreError::NotFound)
        ));

        invites.create(&invite(1, 2)).await.unwrap();
        assert!(matches!(
            invites.resolve(2, 1, InviteStatus::Accepted).await,
            Err(StoreError::NotFound)
        ));

        invites
            .resolve(1, 2, InviteStatus::Accepted)
            .await
            .unwrap();
        // stato terminale: una seconda risposta non trova più l'invito
        assert!(matches!(
            invites.resolve(1, 2, InviteStatus::Rejected).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn pending_lists_are_split_by_direction() {
        let store = Arc::new(MemoryStore::new());
        let invites = invites(&store);

        invites.create(&invite(1, 2)).await.unwrap();
        invites.create(&invite(3, 2)).await.unwrap();
        invites.create(&invite(2, 4)).await.unwrap();

        let incoming = invites.find_incoming_pending(2).await.unwrap();
        let outgoing = invites.find_outgoing_pending(2).await.unwrap();
        assert_eq!(
            incoming.iter().map(|i| i.sender_id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].receiver_id, 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_sends_create_one_invite() {
        let store = Arc::new(MemoryStore::new());

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let invites = invites(&store);
                // metà dei tentativi nella direzione opposta
                let dto = if i % 2 == 0 { invite(1, 2) } else { invite(2, 1) };
                tokio::spawn(async move { invites.create(&dto).await })
            })
            .collect();

        let results = futures::future::join_all(tasks).await;
        let created = results
            .into_iter()
            .filter(|result| matches!(result, Ok(Ok(_))))
            .count();

        assert_eq!(created, 1);
        assert_eq!(store.invite_count(), 1);
    }
}
