use multiversx_sc::{
    api::StorageMapperApi,
    storage::{
        mappers::{LinkedListMapper, LinkedListNode, SingleValueMapper, StorageMapper},
        StorageKey,
    },
    types::{BigUint, ManagedAddress, ManagedVec},
};

use crate::errors::RegistryError;

const ORDER_SUFFIX: &[u8] = b".order";
const AMOUNT_SUFFIX: &[u8] = b".amount";
const TOTAL_SUFFIX: &[u8] = b".total";

/// Amounts and totals are capped at 256 bits.
const AMOUNT_MAX_BYTES: usize = 32;

// ============================================================
// PledgeRegistryMapper
// ============================================================

/// Storage mapper tracking pledgers in insertion order, the amount each
/// has pledged and the running total of all pledges.
///
/// Layout under the base key:
/// - `.order`: linked list of pledger addresses, in enumeration order
/// - `.amount` + address: accumulated amount (empty when zero)
/// - `.total`: sum of all listed amounts
///
/// A pledger is listed iff its amount is nonzero, is listed at most once,
/// and the total always equals the sum of the listed amounts.
pub struct PledgeRegistryMapper<SA>
where
    SA: StorageMapperApi,
{
    amount_key: StorageKey<SA>,
    order: LinkedListMapper<SA, ManagedAddress<SA>>,
    total: SingleValueMapper<SA, BigUint<SA>>,
}

impl<SA> StorageMapper<SA> for PledgeRegistryMapper<SA>
where
    SA: StorageMapperApi,
{
    fn new(base_key: StorageKey<SA>) -> Self {
        let mut order_key = base_key.clone();
        order_key.append_bytes(ORDER_SUFFIX);

        let mut amount_key = base_key.clone();
        amount_key.append_bytes(AMOUNT_SUFFIX);

        let mut total_key = base_key;
        total_key.append_bytes(TOTAL_SUFFIX);

        PledgeRegistryMapper {
            amount_key,
            order: LinkedListMapper::new(order_key),
            total: SingleValueMapper::new(total_key),
        }
    }
}

impl<SA> PledgeRegistryMapper<SA>
where
    SA: StorageMapperApi,
{
    // ========================================================
    // Mutations
    // ========================================================

    /// Adds `amount` to the pledger's balance, appending the pledger to the
    /// end of the list if it had nothing pledged. A listed pledger keeps its
    /// position. Nothing is written if the new balance or total would not
    /// fit in 256 bits.
    pub fn add(
        &mut self,
        pledger: &ManagedAddress<SA>,
        amount: &BigUint<SA>,
    ) -> Result<(), RegistryError> {
        if *amount == 0u64 {
            return Ok(());
        }

        let amount_mapper = self.amount_mapper(pledger);
        let current = amount_mapper.get();
        let new_amount = &current + amount;
        let new_total = self.total.get() + amount;

        let max = Self::max_amount();
        if new_amount > max || new_total > max {
            return Err(RegistryError::Overflow);
        }

        if current == 0u64 {
            self.order.push_back(pledger.clone());
        }
        amount_mapper.set(&new_amount);
        self.total.set(&new_total);

        Ok(())
    }

    /// Removes the pledger and returns what it had pledged, or zero if it
    /// had nothing pledged (in which case nothing changes).
    ///
    /// The list head is popped; unless the head is the pledger itself, it
    /// is written into the slot the pledger occupied, found by scanning from
    /// the back. The head therefore loses its place in the ordering.
    ///
    /// `RegistryError::ConsistencyViolation` means the list and the amounts
    /// disagree. All checks happen before any write, so a failed call leaves
    /// storage as it was.
    pub fn remove(&mut self, pledger: &ManagedAddress<SA>) -> Result<BigUint<SA>, RegistryError> {
        let amount_mapper = self.amount_mapper(pledger);
        let amount = amount_mapper.get();
        if amount == 0u64 {
            return Ok(amount);
        }

        let head = self
            .order
            .front()
            .ok_or(RegistryError::ConsistencyViolation)?;

        let total = self.total.get();
        if total < amount {
            return Err(RegistryError::ConsistencyViolation);
        }

        if head.get_value_as_ref() != pledger {
            let slot = self
                .find_from_back(pledger, head.get_node_id())
                .ok_or(RegistryError::ConsistencyViolation)?;
            self.order.set_node_value(slot, head.get_value_cloned());
        }
        self.order.pop_front();

        amount_mapper.clear();
        self.total.set(total - &amount);

        Ok(amount)
    }

    // ========================================================
    // Queries
    // ========================================================

    /// Amount pledged so far, zero for unknown pledgers.
    pub fn get(&self, pledger: &ManagedAddress<SA>) -> BigUint<SA> {
        self.amount_mapper(pledger).get()
    }

    pub fn contains(&self, pledger: &ManagedAddress<SA>) -> bool {
        !self.amount_mapper(pledger).is_empty()
    }

    /// Number of pledgers with a nonzero amount.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> BigUint<SA> {
        self.total.get()
    }

    /// Snapshot of the pledgers in enumeration order.
    pub fn pledgers(&self) -> ManagedVec<SA, ManagedAddress<SA>> {
        let mut result = ManagedVec::new();
        for pledger in self.iter() {
            result.push(pledger);
        }
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = ManagedAddress<SA>> + '_ {
        self.order.iter().map(|node| node.into_value())
    }

    /// Walks the whole list and checks it against the stored amounts and
    /// total: no pledger listed twice, every listed pledger has a nonzero
    /// amount, and the listed amounts sum to the total. Amount slots of
    /// unlisted pledgers cannot be enumerated, so a nonzero amount outside
    /// the list goes unnoticed here (`remove` still reports it).
    /// Costs a full scan, meant for tests and audits.
    pub fn check_internal_consistency(&self) -> bool {
        if !self.order.check_internal_consistency() {
            return false;
        }

        let mut seen = ManagedVec::<SA, ManagedAddress<SA>>::new();
        let mut sum = BigUint::zero();
        for pledger in self.iter() {
            if seen.contains(&pledger) {
                return false;
            }

            let amount = self.get(&pledger);
            if amount == 0u64 {
                return false;
            }
            sum += &amount;
            seen.push(pledger);
        }

        sum == self.total.get()
    }

    // ========================================================
    // Internals
    // ========================================================

    fn amount_mapper(&self, pledger: &ManagedAddress<SA>) -> SingleValueMapper<SA, BigUint<SA>> {
        let mut key = self.amount_key.clone();
        key.append_item(pledger);
        SingleValueMapper::new(key)
    }

    /// Scans from the back towards the front, stopping before `stop_node_id`.
    fn find_from_back(
        &self,
        pledger: &ManagedAddress<SA>,
        stop_node_id: u32,
    ) -> Option<LinkedListNode<ManagedAddress<SA>>> {
        let mut cursor = self.order.back();
        while let Some(node) = cursor {
            if node.get_node_id() == stop_node_id {
                return None;
            }
            if node.get_value_as_ref() == pledger {
                return Some(node);
            }
            cursor = self.order.get_node_by_id(node.get_prev_node_id());
        }
        None
    }

    fn max_amount() -> BigUint<SA> {
        BigUint::from_bytes_be(&[0xffu8; AMOUNT_MAX_BYTES])
    }
}
