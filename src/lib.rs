#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod pledge_registry_proxy;
pub mod registry;

use errors::{ERR_BELOW_MIN_PLEDGE, ERR_NOTHING_TO_WITHDRAW, ERR_ZERO_PLEDGE};
use registry::PledgeRegistryMapper;

// ============================================================
// Contract
// ============================================================

/// Collects EGLD pledges, keeping every pledger with a nonzero balance
/// listed in insertion order alongside the running total.
#[multiversx_sc::contract]
pub trait PledgeRegistry {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, min_pledge: BigUint) {
        self.min_pledge().set(&min_pledge);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: pledge
    // Repeated pledges accumulate; the pledger keeps its place.
    // ========================================================

    #[endpoint(pledge)]
    #[payable("EGLD")]
    fn pledge(&self) {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().egld_value().clone_value();

        require!(payment > 0u64, ERR_ZERO_PLEDGE);
        require!(payment >= self.min_pledge().get(), ERR_BELOW_MIN_PLEDGE);

        let mut pledges = self.pledges();
        if let Err(err) = pledges.add(&caller, &payment) {
            sc_panic!(err.message());
        }

        self.pledge_event(&caller, &payment, &pledges.get(&caller));
    }

    // ========================================================
    // ENDPOINT: withdrawPledge
    // Pays back the caller's whole pledge.
    // ========================================================

    #[endpoint(withdrawPledge)]
    fn withdraw_pledge(&self) -> BigUint {
        let caller = self.blockchain().get_caller();
        let amount = self.release(&caller);
        require!(amount > 0u64, ERR_NOTHING_TO_WITHDRAW);

        amount
    }

    // ========================================================
    // ENDPOINT: refundPledge (owner)
    // Unknown pledgers are a no-op returning zero.
    // ========================================================

    #[only_owner]
    #[endpoint(refundPledge)]
    fn refund_pledge(&self, pledger: ManagedAddress) -> BigUint {
        self.release(&pledger)
    }

    #[only_owner]
    #[endpoint(setMinPledge)]
    fn set_min_pledge(&self, min_pledge: BigUint) {
        self.min_pledge().set(&min_pledge);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn release(&self, pledger: &ManagedAddress) -> BigUint {
        let amount = match self.pledges().remove(pledger) {
            Ok(amount) => amount,
            Err(err) => sc_panic!(err.message()),
        };

        if amount > 0u64 {
            self.send().direct_egld(pledger, &amount);
            self.pledge_withdrawn_event(pledger, &amount);
        }

        amount
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getPledge)]
    fn get_pledge(&self, pledger: &ManagedAddress) -> BigUint {
        self.pledges().get(pledger)
    }

    #[view(isPledger)]
    fn is_pledger(&self, pledger: &ManagedAddress) -> bool {
        self.pledges().contains(pledger)
    }

    #[view(getPledgerCount)]
    fn get_pledger_count(&self) -> u64 {
        self.pledges().len() as u64
    }

    #[view(getPledgersAsOrderedList)]
    fn get_pledgers_as_ordered_list(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for pledger in self.pledges().iter() {
            result.push(pledger);
        }
        result
    }

    #[view(getPledgers)]
    fn get_pledgers(&self, from: u64, count: u64) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for pledger in self
            .pledges()
            .iter()
            .skip(usize::try_from(from).unwrap_or(usize::MAX))
            .take(usize::try_from(count).unwrap_or(usize::MAX))
        {
            result.push(pledger);
        }
        result
    }

    #[view(getTotal)]
    fn get_total(&self) -> BigUint {
        self.pledges().total()
    }

    #[view(getMinPledge)]
    fn get_min_pledge(&self) -> BigUint {
        self.min_pledge().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("pledge")]
    fn pledge_event(
        &self,
        #[indexed] pledger: &ManagedAddress,
        #[indexed] amount: &BigUint,
        balance: &BigUint,
    );

    #[event("pledgeWithdrawn")]
    fn pledge_withdrawn_event(&self, #[indexed] pledger: &ManagedAddress, amount: &BigUint);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("minPledge")]
    fn min_pledge(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("pledges")]
    fn pledges(&self) -> PledgeRegistryMapper<Self::Api>;
}
