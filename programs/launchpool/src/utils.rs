use anchor_lang::{
    prelude::*,
    solana_program::{
        keccak,
        program::invoke,
        program_pack::Pack,
        system_instruction,
    },
};
use anchor_spl::{
    token::spl_token,
    token_interface::{
        transfer_checked,
        Mint,
        TransferChecked,
    },
};

use crate::{
    error::LaunchpoolError,
    state::{
        contribution::ContributionState,
        presale::{
            Lifecycle,
            Presale,
            WhitelistKind,
        },
    },
};

pub fn transfer_sols<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let transfer_ix = system_instruction::transfer(&from.key(), &to.key(), amount);

    invoke(
        &transfer_ix,
        &[
            from.to_account_info(),
            to.to_account_info(),
            system_program.to_account_info(),
        ],
    )?;

    Ok(())
}

pub fn transfer_sol_from_vault<'info>(
    vault: AccountInfo<'info>,
    recipient: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let vault_lamports = **vault.lamports.borrow();

    require!(vault_lamports >= amount, LaunchpoolError::InsufficientFunds);

    **vault.try_borrow_mut_lamports()? -= amount;
    **recipient.try_borrow_mut_lamports()? += amount;

    Ok(())
}

pub fn transfer_tokens<'info>(
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        to,
        authority,
        mint: mint.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program, cpi_accounts);

    transfer_checked(cpi_ctx, amount, mint.decimals)?;
    Ok(())
}

/// Escrow the sale needs before it can open: enough to cover every token
/// sold at the hard cap plus the pool allocation priced at the listing rate.
pub fn required_deposit(
    hard_cap: u64,
    presale_rate: u64,
    listing_rate: u64,
    liquidity_bps: u16,
) -> Result<(u64, u64, u64)> {
    let tokens_sale = (hard_cap as u128)
        .checked_mul(presale_rate as u128)
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let tokens_liquidity = (hard_cap as u128)
        .checked_mul(liquidity_bps as u128)
        .and_then(|f| f.checked_div(10000))
        .and_then(|f| f.checked_mul(listing_rate as u128))
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let total = tokens_sale
        .checked_add(tokens_liquidity)
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    Ok((
        u64::try_from(tokens_sale).map_err(|_| LaunchpoolError::ArithmeticOverflow)?,
        u64::try_from(tokens_liquidity).map_err(|_| LaunchpoolError::ArithmeticOverflow)?,
        u64::try_from(total).map_err(|_| LaunchpoolError::ArithmeticOverflow)?,
    ))
}

pub struct Settlement {
    pub tokens_sold: u64,
    pub currency_for_liquidity: u64,
    pub tokens_for_liquidity: u64,
    pub platform_fee: u64,
    pub owner_proceeds: u64,
}

/// The settlement breakdown of a closed raise, in the order the funds move:
/// tokens owed to contributors, the currency share paired into the pool and
/// the tokens matching it at the listing rate, then the platform fee and the
/// residual owner proceeds.
pub fn settle_raise(
    total_raised: u64,
    presale_rate: u64,
    listing_rate: u64,
    liquidity_bps: u16,
    fee_bps: u16,
) -> Result<Settlement> {
    let tokens_sold = (total_raised as u128)
        .checked_mul(presale_rate as u128)
        .and_then(|f| u64::try_from(f).ok())
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let currency_for_liquidity = (total_raised as u128)
        .checked_mul(liquidity_bps as u128)
        .and_then(|f| f.checked_div(10000))
        .and_then(|f| u64::try_from(f).ok())
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let tokens_for_liquidity = (currency_for_liquidity as u128)
        .checked_mul(listing_rate as u128)
        .and_then(|f| u64::try_from(f).ok())
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let platform_fee = (total_raised as u128)
        .checked_mul(fee_bps as u128)
        .and_then(|f| f.checked_div(10000))
        .and_then(|f| u64::try_from(f).ok())
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let owner_proceeds = total_raised
        .checked_sub(currency_for_liquidity)
        .and_then(|f| f.checked_sub(platform_fee))
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    Ok(Settlement {
        tokens_sold,
        currency_for_liquidity,
        tokens_for_liquidity,
        platform_fee,
        owner_proceeds,
    })
}

/// Escrow left after the sold and pool allocations are carved out. A
/// negative result means the deposit requirement was violated upstream, so
/// this surfaces as a hard error rather than a branch.
pub fn leftover_tokens(
    token_deposit: u64,
    tokens_sold: u64,
    tokens_for_liquidity: u64,
) -> Result<u64> {
    token_deposit
        .checked_sub(tokens_sold)
        .and_then(|f| f.checked_sub(tokens_for_liquidity))
        .ok_or(LaunchpoolError::BalanceInvariantViolated.into())
}

pub fn contributor_leaf(contributor: &Pubkey) -> [u8; 32] {
    keccak::hashv(&[contributor.as_ref()]).to_bytes()
}

/// Standard sorted-pair inclusion proof against the currently stored root.
/// Proofs are never cached, so swapping the root immediately invalidates
/// proofs for removed leaves.
pub fn verify_merkle_proof(proof: &[[u8; 32]], root: &[u8; 32], leaf: [u8; 32]) -> bool {
    let mut computed = leaf;
    for node in proof {
        computed = if computed <= *node {
            keccak::hashv(&[&computed, node]).to_bytes()
        } else {
            keccak::hashv(&[node, &computed]).to_bytes()
        };
    }
    computed == *root
}

/// Holder check for NFT-gated sales. An account that cannot be read as a
/// token account for the configured collection held by the contributor is a
/// probe failure, distinct from a readable account with a zero balance.
pub fn probe_nft_balance(
    token_account: &AccountInfo,
    collection: &Pubkey,
    holder: &Pubkey,
) -> Result<()> {
    require!(
        token_account.owner == &spl_token::ID,
        LaunchpoolError::WhitelistProbeFailed
    );

    let data = token_account
        .try_borrow_data()
        .map_err(|_| LaunchpoolError::WhitelistProbeFailed)?;
    let account = spl_token::state::Account::unpack(&data)
        .map_err(|_| LaunchpoolError::WhitelistProbeFailed)?;

    require!(
        account.mint == *collection && account.owner == *holder,
        LaunchpoolError::WhitelistProbeFailed
    );
    require!(account.amount > 0, LaunchpoolError::NotWhitelisted);

    Ok(())
}

pub fn check_whitelisted(
    presale: &Presale,
    contributor: &Pubkey,
    merkle_proof: Option<&Vec<[u8; 32]>>,
    nft_token_account: Option<AccountInfo>,
) -> Result<()> {
    match presale.whitelist_kind {
        WhitelistKind::None => Ok(()),
        WhitelistKind::Merkle => {
            let proof = merkle_proof.ok_or(LaunchpoolError::NotWhitelisted)?;
            require!(
                verify_merkle_proof(proof, &presale.merkle_root, contributor_leaf(contributor)),
                LaunchpoolError::NotWhitelisted
            );
            Ok(())
        }
        WhitelistKind::Nft => {
            let account = nft_token_account.ok_or(LaunchpoolError::WhitelistProbeFailed)?;
            probe_nft_balance(&account, &presale.nft_collection, contributor)
        }
    }
}

/// Books a contribution. State is committed before any funds move, so the
/// caller pulls payment only after this returns. Rejects outright instead of
/// clamping when the hard cap would be crossed.
pub fn record_contribution(
    presale: &mut Presale,
    contribution: &mut ContributionState,
    contributor: &Pubkey,
    amount: u64,
    now: i64,
) -> Result<()> {
    require!(!presale.paused, LaunchpoolError::ContractPaused);
    require!(
        presale.lifecycle == Lifecycle::Active,
        LaunchpoolError::NotInPurchasePeriod
    );
    require!(
        presale.in_purchase_window(now),
        LaunchpoolError::NotInPurchasePeriod
    );
    require!(amount > 0, LaunchpoolError::ZeroAmount);

    let new_total = contribution
        .amount
        .checked_add(amount)
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;
    require!(
        new_total >= presale.min_contribution,
        LaunchpoolError::BelowMinimumContribution
    );
    require!(
        new_total <= presale.max_contribution,
        LaunchpoolError::AboveMaximumContribution
    );

    let new_raised = presale
        .total_raised
        .checked_add(amount)
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;
    require!(
        new_raised <= presale.hard_cap,
        LaunchpoolError::HardCapExceeded
    );

    contribution.contributor = *contributor;
    contribution.amount = new_total;
    presale.total_raised = new_raised;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_requirement_covers_sale_and_pool() {
        let (sale, liquidity, total) = required_deposit(10, 1000, 800, 8000).unwrap();
        assert_eq!(sale, 10_000);
        assert_eq!(liquidity, 6_400);
        assert_eq!(total, 16_400);
    }

    #[test]
    fn settlement_breakdown_follows_the_formula_order() {
        // hard_cap 10, soft_cap 5, rate 1000/800, 80% liquidity, single
        // contribution of 6 against a 600_000 deposit.
        let s = settle_raise(6, 1000, 800, 8000, 0).unwrap();
        assert_eq!(s.tokens_sold, 6_000);
        assert_eq!(s.currency_for_liquidity, 4); // floor of 4.8
        assert_eq!(s.tokens_for_liquidity, 3_200);
        assert_eq!(s.platform_fee, 0);
        assert_eq!(s.owner_proceeds, 2);

        let leftover = leftover_tokens(600_000, s.tokens_sold, s.tokens_for_liquidity).unwrap();
        assert_eq!(leftover, 590_800);
        // Token conservation: every escrowed token is accounted for, whether
        // the leftover is returned, burned or vested.
        assert_eq!(s.tokens_sold + s.tokens_for_liquidity + leftover, 600_000);
    }

    #[test]
    fn fee_and_owner_split_exhaust_the_raise() {
        let s = settle_raise(1_000_000, 500, 400, 6000, 250).unwrap();
        assert_eq!(s.currency_for_liquidity, 600_000);
        assert_eq!(s.platform_fee, 25_000);
        assert_eq!(s.owner_proceeds, 375_000);
        assert_eq!(
            s.currency_for_liquidity + s.platform_fee + s.owner_proceeds,
            1_000_000
        );
    }

    #[test]
    fn leftover_underflow_is_an_invariant_violation() {
        assert!(leftover_tokens(5_000, 6_000, 0).is_err());
        assert!(leftover_tokens(6_000, 5_000, 2_000).is_err());
    }

    fn hash_pair(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
        if a <= b {
            keccak::hashv(&[&a, &b]).to_bytes()
        } else {
            keccak::hashv(&[&b, &a]).to_bytes()
        }
    }

    #[test]
    fn merkle_member_verifies_and_stranger_does_not() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mallory = Pubkey::new_unique();

        let leaf_a = contributor_leaf(&alice);
        let leaf_b = contributor_leaf(&bob);
        let root = hash_pair(leaf_a, leaf_b);

        assert!(verify_merkle_proof(&[leaf_b], &root, leaf_a));
        assert!(verify_merkle_proof(&[leaf_a], &root, leaf_b));
        assert!(!verify_merkle_proof(&[leaf_b], &root, contributor_leaf(&mallory)));
        assert!(!verify_merkle_proof(&[], &root, leaf_a));
    }

    fn active_presale() -> Presale {
        Presale {
            owner: Pubkey::new_unique(),
            token: Pubkey::new_unique(),
            currency: Pubkey::default(),
            fee_collector: Pubkey::new_unique(),
            fee_bps: 0,
            token_deposit: 600_000,
            hard_cap: 10,
            soft_cap: 5,
            min_contribution: 2,
            max_contribution: 6,
            presale_rate: 1000,
            listing_rate: 800,
            liquidity_bps: 8000,
            slippage_bps: 0,
            start_time: 1_000,
            end_time: 2_000,
            lockup_duration: 3600,
            vesting_bps: 0,
            vesting_duration: 0,
            leftover_option: crate::state::presale::LeftoverOption::Return,
            whitelist_kind: WhitelistKind::None,
            merkle_root: [0u8; 32],
            nft_collection: Pubkey::default(),
            lifecycle: Lifecycle::Active,
            paused: false,
            total_raised: 0,
            tokens_sold: 0,
            token_balance: 600_000,
            tokens_liquidity: 6_400,
            currency_for_liquidity: 0,
            liquidity_seeded: false,
            liquidity_locked: false,
            claim_deadline: 0,
            identifier: "sale-1".to_string(),
        }
    }

    fn empty_contribution(contributor: Pubkey) -> ContributionState {
        ContributionState {
            contributor,
            amount: 0,
            tokens_claimed: 0,
            refunded: false,
        }
    }

    #[test]
    fn contributions_accumulate_into_total_raised() {
        let mut presale = active_presale();
        let payer = Pubkey::new_unique();
        let mut contribution = empty_contribution(payer);

        record_contribution(&mut presale, &mut contribution, &payer, 2, 1_500).unwrap();
        record_contribution(&mut presale, &mut contribution, &payer, 3, 1_600).unwrap();

        assert_eq!(contribution.amount, 5);
        assert_eq!(presale.total_raised, 5);
    }

    #[test]
    fn over_cap_contribution_is_rejected_not_clamped() {
        let mut presale = active_presale();
        presale.max_contribution = 10;
        presale.total_raised = 8;
        let payer = Pubkey::new_unique();
        let mut contribution = empty_contribution(payer);

        // 3 over an 8/10 raise would cross the cap; the whole call fails and
        // nothing is booked.
        assert!(record_contribution(&mut presale, &mut contribution, &payer, 3, 1_500).is_err());
        assert_eq!(presale.total_raised, 8);
        assert_eq!(contribution.amount, 0);

        record_contribution(&mut presale, &mut contribution, &payer, 2, 1_500).unwrap();
        assert_eq!(presale.total_raised, 10);
    }

    #[test]
    fn cumulative_limits_bound_the_per_address_sum() {
        let mut presale = active_presale();
        let payer = Pubkey::new_unique();
        let mut contribution = empty_contribution(payer);

        assert!(record_contribution(&mut presale, &mut contribution, &payer, 1, 1_500).is_err());
        record_contribution(&mut presale, &mut contribution, &payer, 4, 1_500).unwrap();
        record_contribution(&mut presale, &mut contribution, &payer, 2, 1_500).unwrap();
        assert!(record_contribution(&mut presale, &mut contribution, &payer, 1, 1_500).is_err());
        assert_eq!(contribution.amount, 6);
    }

    #[test]
    fn purchase_window_and_pause_gate_contributions() {
        let mut presale = active_presale();
        let payer = Pubkey::new_unique();
        let mut contribution = empty_contribution(payer);

        assert!(record_contribution(&mut presale, &mut contribution, &payer, 2, 999).is_err());
        assert!(record_contribution(&mut presale, &mut contribution, &payer, 2, 2_001).is_err());
        assert!(record_contribution(&mut presale, &mut contribution, &payer, 0, 1_500).is_err());

        presale.paused = true;
        assert!(record_contribution(&mut presale, &mut contribution, &payer, 2, 1_500).is_err());

        presale.paused = false;
        presale.lifecycle = Lifecycle::Pending;
        assert!(record_contribution(&mut presale, &mut contribution, &payer, 2, 1_500).is_err());
    }

    #[test]
    fn root_swap_invalidates_stale_proofs() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let carol = Pubkey::new_unique();

        let leaf_a = contributor_leaf(&alice);
        let leaf_b = contributor_leaf(&bob);
        let leaf_c = contributor_leaf(&carol);

        let old_root = hash_pair(leaf_a, leaf_b);
        assert!(verify_merkle_proof(&[leaf_b], &old_root, leaf_a));

        // Owner replaces the allowlist with {bob, carol}: alice's proof is
        // stale for all future contributions.
        let new_root = hash_pair(leaf_b, leaf_c);
        assert!(!verify_merkle_proof(&[leaf_b], &new_root, leaf_a));
        assert!(verify_merkle_proof(&[leaf_c], &new_root, leaf_b));
    }
}
