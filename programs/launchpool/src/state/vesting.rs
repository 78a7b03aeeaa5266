use anchor_lang::prelude::*;

use crate::error::LaunchpoolError;

/// Tranche-based schedule for leftover tokens routed to the owner at
/// settlement. Nothing is vested at registration; `tranche_bps` of the
/// total unlocks for every full `tranche_interval` elapsed since
/// `start_time`, capped at the total.
#[account]
#[derive(InitSpace)]
pub struct VestingSchedule {
    pub beneficiary: Pubkey,
    pub token: Pubkey,
    pub total_amount: u64,
    pub released: u64,
    pub start_time: i64,
    pub tranche_bps: u16,
    pub tranche_interval: i64,
}

impl VestingSchedule {
    pub fn vested_amount(&self, now: i64) -> Result<u64> {
        if now <= self.start_time || self.total_amount == 0 {
            return Ok(0);
        }
        let elapsed = now - self.start_time;
        let tranches = elapsed
            .checked_div(self.tranche_interval)
            .ok_or(LaunchpoolError::ArithmeticOverflow)? as u128;

        let unlocked = (self.total_amount as u128)
            .checked_mul(self.tranche_bps as u128)
            .and_then(|f| f.checked_mul(tranches))
            .and_then(|f| f.checked_div(10000))
            .ok_or(LaunchpoolError::ArithmeticOverflow)?;

        Ok(u64::try_from(unlocked.min(self.total_amount as u128))
            .map_err(|_| LaunchpoolError::ArithmeticOverflow)?)
    }

    pub fn remaining_vested(&self, now: i64) -> Result<u64> {
        self.vested_amount(now)?
            .checked_sub(self.released)
            .ok_or(LaunchpoolError::ArithmeticOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> VestingSchedule {
        VestingSchedule {
            beneficiary: Pubkey::new_unique(),
            token: Pubkey::new_unique(),
            total_amount: 1_000,
            released: 0,
            start_time: 10_000,
            tranche_bps: 2500,
            tranche_interval: 100,
        }
    }

    #[test]
    fn nothing_vested_at_registration() {
        let s = schedule();
        assert_eq!(s.vested_amount(10_000).unwrap(), 0);
        assert_eq!(s.vested_amount(10_099).unwrap(), 0);
    }

    #[test]
    fn tranches_unlock_per_full_interval() {
        let s = schedule();
        assert_eq!(s.vested_amount(10_100).unwrap(), 250);
        assert_eq!(s.vested_amount(10_250).unwrap(), 500);
        assert_eq!(s.vested_amount(10_399).unwrap(), 750);
        assert_eq!(s.vested_amount(10_400).unwrap(), 1_000);
    }

    #[test]
    fn unlocked_amount_caps_at_total() {
        let s = schedule();
        assert_eq!(s.vested_amount(99_999).unwrap(), 1_000);
    }

    #[test]
    fn remaining_accounts_for_prior_releases() {
        let mut s = schedule();
        s.released = 250;
        assert_eq!(s.remaining_vested(10_250).unwrap(), 250);
        assert_eq!(s.remaining_vested(10_100).unwrap(), 0);
    }
}
