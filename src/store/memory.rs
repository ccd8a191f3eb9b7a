//! In-process store backend.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::Mutex;

use super::{GameStore, Pile, ScalarField, StoreResult};
use crate::game::Card;

#[derive(Debug, Default)]
struct RoomRecord {
    scalars: HashMap<ScalarField, String>,
    piles: HashMap<Pile, BTreeSet<Card>>,
}

/// Hash-map store with the same observable contract as a networked backend.
/// Every operation takes the lock once, which is what makes the batch move
/// all-or-nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<String, RoomRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn scalar(&self, room: &str, field: ScalarField) -> StoreResult<Option<String>> {
        let rooms = self.rooms.lock().await;
        Ok(rooms
            .get(room)
            .and_then(|record| record.scalars.get(&field))
            .cloned())
    }

    async fn set_scalar(&self, room: &str, field: ScalarField, value: &str) -> StoreResult<()> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room.to_string())
            .or_default()
            .scalars
            .insert(field, value.to_string());
        Ok(())
    }

    async fn clear_scalar(&self, room: &str, field: ScalarField) -> StoreResult<()> {
        let mut rooms = self.rooms.lock().await;
        if let Some(record) = rooms.get_mut(room) {
            record.scalars.remove(&field);
        }
        Ok(())
    }

    async fn members(&self, room: &str, pile: Pile) -> StoreResult<Vec<Card>> {
        let rooms = self.rooms.lock().await;
        Ok(rooms
            .get(room)
            .and_then(|record| record.piles.get(&pile))
            .map(|cards| cards.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn add_members(&self, room: &str, pile: Pile, cards: &[Card]) -> StoreResult<()> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room.to_string())
            .or_default()
            .piles
            .entry(pile)
            .or_default()
            .extend(cards.iter().copied());
        Ok(())
    }

    async fn clear_pile(&self, room: &str, pile: Pile) -> StoreResult<()> {
        let mut rooms = self.rooms.lock().await;
        if let Some(record) = rooms.get_mut(room) {
            record.piles.remove(&pile);
        }
        Ok(())
    }

    async fn move_members(
        &self,
        room: &str,
        from: Pile,
        to: Pile,
        cards: &[Card],
    ) -> StoreResult<bool> {
        let mut rooms = self.rooms.lock().await;
        let Some(record) = rooms.get_mut(room) else {
            return Ok(false);
        };

        // A batch that repeats a card can never fully move.
        let batch: BTreeSet<Card> = cards.iter().copied().collect();
        if batch.len() != cards.len() {
            return Ok(false);
        }
        match record.piles.get(&from) {
            Some(source) if batch.is_subset(source) => {}
            _ => return Ok(false),
        }

        if let Some(source) = record.piles.get_mut(&from) {
            for card in &batch {
                source.remove(card);
            }
        }
        record.piles.entry(to).or_default().extend(batch);
        Ok(true)
    }

    async fn wipe_room(&self, room: &str) -> StoreResult<()> {
        let mut rooms = self.rooms.lock().await;
        rooms.remove(room);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Seat;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|code| code.parse().unwrap()).collect()
    }

    fn hand(seat: u8) -> Pile {
        Pile::Hand(Seat::new(seat).unwrap())
    }

    #[tokio::test]
    async fn scalars_are_scoped_to_their_room() {
        let store = MemoryStore::new();
        store
            .set_scalar("a", ScalarField::TopCard, "S3")
            .await
            .unwrap();

        assert_eq!(
            store.scalar("a", ScalarField::TopCard).await.unwrap(),
            Some("S3".to_string())
        );
        assert_eq!(store.scalar("b", ScalarField::TopCard).await.unwrap(), None);

        store.clear_scalar("a", ScalarField::TopCard).await.unwrap();
        assert_eq!(store.scalar("a", ScalarField::TopCard).await.unwrap(), None);
    }

    #[tokio::test]
    async fn identity_slots_do_not_alias_hands() {
        let store = MemoryStore::new();
        let seat = Seat::new(1).unwrap();
        store
            .add_members("a", Pile::Hand(seat), &cards(&["S3", "D4"]))
            .await
            .unwrap();
        store
            .set_scalar("a", ScalarField::SeatIdentity(seat), "socket-1")
            .await
            .unwrap();

        assert_eq!(
            store.members("a", Pile::Hand(seat)).await.unwrap(),
            cards(&["S3", "D4"])
        );
        assert_eq!(
            store
                .scalar("a", ScalarField::SeatIdentity(seat))
                .await
                .unwrap(),
            Some("socket-1".to_string())
        );
    }

    #[tokio::test]
    async fn members_come_back_in_ascending_order() {
        let store = MemoryStore::new();
        store
            .add_members("a", Pile::Board, &cards(&["H7", "S2", "S3", "C7"]))
            .await
            .unwrap();

        assert_eq!(
            store.members("a", Pile::Board).await.unwrap(),
            cards(&["S3", "C7", "H7", "S2"])
        );
    }

    #[tokio::test]
    async fn batch_move_is_all_or_nothing() {
        let store = MemoryStore::new();
        store
            .add_members("a", hand(1), &cards(&["S3", "D4", "H5"]))
            .await
            .unwrap();

        // One card missing from the hand: nothing may move.
        let moved = store
            .move_members("a", hand(1), Pile::Board, &cards(&["S3", "S9"]))
            .await
            .unwrap();
        assert!(!moved);
        assert_eq!(
            store.members("a", hand(1)).await.unwrap(),
            cards(&["S3", "D4", "H5"])
        );
        assert!(store.members("a", Pile::Board).await.unwrap().is_empty());

        let moved = store
            .move_members("a", hand(1), Pile::Board, &cards(&["S3", "D4"]))
            .await
            .unwrap();
        assert!(moved);
        assert_eq!(store.members("a", hand(1)).await.unwrap(), cards(&["H5"]));
        assert_eq!(
            store.members("a", Pile::Board).await.unwrap(),
            cards(&["S3", "D4"])
        );
    }

    #[tokio::test]
    async fn repeated_card_in_a_batch_moves_nothing() {
        let store = MemoryStore::new();
        store
            .add_members("a", hand(2), &cards(&["S3", "D4"]))
            .await
            .unwrap();

        let moved = store
            .move_members("a", hand(2), Pile::Board, &cards(&["S3", "S3"]))
            .await
            .unwrap();
        assert!(!moved);
        assert_eq!(
            store.members("a", hand(2)).await.unwrap(),
            cards(&["S3", "D4"])
        );
    }

    #[tokio::test]
    async fn wipe_drops_the_whole_room() {
        let store = MemoryStore::new();
        store
            .set_scalar("a", ScalarField::CurrentSeat, "2")
            .await
            .unwrap();
        store
            .add_members("a", Pile::Board, &cards(&["S3"]))
            .await
            .unwrap();
        store
            .set_scalar("b", ScalarField::CurrentSeat, "4")
            .await
            .unwrap();

        store.wipe_room("a").await.unwrap();

        assert_eq!(store.scalar("a", ScalarField::CurrentSeat).await.unwrap(), None);
        assert!(store.members("a", Pile::Board).await.unwrap().is_empty());
        assert_eq!(
            store.scalar("b", ScalarField::CurrentSeat).await.unwrap(),
            Some("4".to_string())
        );
    }
}
