use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn,
    transfer_checked,
    Burn,
    Mint,
    TokenAccount,
    TokenInterface,
    TransferChecked,
};

use crate::{
    constants::{
        CLAIM_WINDOW,
        PRESALE_SEED,
        VAULT_SEED,
        VESTING_SEED,
    },
    error::LaunchpoolError,
    state::{
        presale::{
            LeftoverOption,
            Lifecycle,
            Presale,
        },
        vault::Vault,
        vesting::VestingSchedule,
    },
    utils::{
        leftover_tokens,
        settle_raise,
        transfer_sol_from_vault,
    },
};

#[event]
pub struct Finalized {
    pub total_raised: u64,
    pub tokens_sold: u64,
    pub timestamp: i64,
}

#[event]
pub struct LeftoverTokensBurned {
    pub amount: u64,
}

#[event]
pub struct LeftoverTokensVested {
    pub amount: u64,
    pub beneficiary: Pubkey,
}

#[derive(Accounts)]
pub struct Finalize<'info> {
    #[account(
        mut,
        seeds = [PRESALE_SEED, token_mint.key().as_ref(), presale.identifier.as_ref()],
        bump,
    )]
    pub presale: Box<Account<'info, Presale>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: payout target, matched against the configured collector
    #[account(
        mut,
        constraint = fee_collector.key() == presale.fee_collector @ LaunchpoolError::InvalidFeeCollector
    )]
    pub fee_collector: AccountInfo<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, presale.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        constraint = token_vault_account.mint == token_mint.key()
            && token_vault_account.owner == presale.key()
    )]
    pub token_vault_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Required for the Return leftover option.
    #[account(mut)]
    pub owner_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// Required for the Vest leftover option.
    #[account(
        init_if_needed,
        payer = owner,
        seeds = [VESTING_SEED, presale.key().as_ref()],
        bump,
        space = 8 + VestingSchedule::INIT_SPACE
    )]
    pub vesting_schedule: Option<Box<Account<'info, VestingSchedule>>>,

    /// Required for the Vest leftover option; custody account owned by the
    /// schedule PDA, created ahead of time by the caller.
    #[account(mut)]
    pub vesting_vault_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// Currency accounts, required when the raise is SPL-denominated.
    pub currency_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    #[account(mut)]
    pub currency_vault_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(mut)]
    pub fee_collector_currency_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(mut)]
    pub owner_currency_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn finalize(ctx: Context<Finalize>) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let now = Clock::get()?.unix_timestamp;

    require!(
        presale.owner == ctx.accounts.owner.key(),
        LaunchpoolError::NotOwner
    );
    require!(
        presale.lifecycle == Lifecycle::Active,
        LaunchpoolError::AlreadyFinalized
    );
    require!(presale.can_settle(now), LaunchpoolError::PresaleNotEnded);
    require!(
        presale.total_raised >= presale.soft_cap,
        LaunchpoolError::SoftCapNotReached
    );
    require!(presale.liquidity_seeded, LaunchpoolError::LiquidityNotSeeded);
    require!(presale.liquidity_locked, LaunchpoolError::LiquidityNotLocked);

    let settlement = settle_raise(
        presale.total_raised,
        presale.presale_rate,
        presale.listing_rate,
        presale.liquidity_bps,
        presale.fee_bps,
    )?;
    let leftover = leftover_tokens(
        presale.token_deposit,
        settlement.tokens_sold,
        settlement.tokens_for_liquidity,
    )?;

    // Every escrowed token must now be spoken for: sold allocation for the
    // claimants, pool allocation already moved, leftover disposed below.
    let remaining = presale
        .token_balance
        .checked_sub(settlement.tokens_sold)
        .and_then(|f| f.checked_sub(leftover))
        .ok_or(LaunchpoolError::BalanceInvariantViolated)?;
    require!(remaining == 0, LaunchpoolError::BalanceInvariantViolated);

    presale.tokens_sold = settlement.tokens_sold;
    presale.token_balance = 0;
    presale.lifecycle = Lifecycle::Finalized;
    presale.claim_deadline = now + CLAIM_WINDOW;

    let token_mint_key = ctx.accounts.token_mint.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        PRESALE_SEED,
        token_mint_key.as_ref(),
        presale.identifier.as_ref(),
        &[ctx.bumps.presale],
    ]];

    // Proceeds: platform fee first, then the residual to the owner.
    if presale.is_native() {
        transfer_sol_from_vault(
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.fee_collector.to_account_info(),
            settlement.platform_fee,
        )?;
        transfer_sol_from_vault(
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.owner.to_account_info(),
            settlement.owner_proceeds,
        )?;
    } else {
        let currency_mint = ctx
            .accounts
            .currency_mint
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;
        require!(
            currency_mint.key() == presale.currency,
            LaunchpoolError::WrongCurrency
        );
        let currency_vault = ctx
            .accounts
            .currency_vault_account
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;
        let fee_account = ctx
            .accounts
            .fee_collector_currency_account
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;
        let owner_account = ctx
            .accounts
            .owner_currency_account
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;

        transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: currency_vault.to_account_info(),
                    mint: currency_mint.to_account_info(),
                    to: fee_account.to_account_info(),
                    authority: presale.to_account_info(),
                },
                signer_seeds,
            ),
            settlement.platform_fee,
            currency_mint.decimals,
        )?;
        transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: currency_vault.to_account_info(),
                    mint: currency_mint.to_account_info(),
                    to: owner_account.to_account_info(),
                    authority: presale.to_account_info(),
                },
                signer_seeds,
            ),
            settlement.owner_proceeds,
            currency_mint.decimals,
        )?;
    }

    match presale.leftover_option {
        LeftoverOption::Return => {
            let owner_token_account = ctx
                .accounts
                .owner_token_account
                .as_ref()
                .ok_or(LaunchpoolError::MissingLeftoverAccounts)?;
            require!(
                owner_token_account.mint == ctx.accounts.token_mint.key()
                    && owner_token_account.owner == presale.owner,
                LaunchpoolError::MissingLeftoverAccounts
            );

            transfer_checked(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    TransferChecked {
                        from: ctx.accounts.token_vault_account.to_account_info(),
                        mint: ctx.accounts.token_mint.to_account_info(),
                        to: owner_token_account.to_account_info(),
                        authority: presale.to_account_info(),
                    },
                    signer_seeds,
                ),
                leftover,
                ctx.accounts.token_mint.decimals,
            )?;
        }
        LeftoverOption::Burn => {
            burn(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Burn {
                        from: ctx.accounts.token_vault_account.to_account_info(),
                        mint: ctx.accounts.token_mint.to_account_info(),
                        authority: presale.to_account_info(),
                    },
                    signer_seeds,
                ),
                leftover,
            )?;

            emit!(LeftoverTokensBurned { amount: leftover });
        }
        LeftoverOption::Vest => {
            let schedule = ctx
                .accounts
                .vesting_schedule
                .as_mut()
                .ok_or(LaunchpoolError::MissingLeftoverAccounts)?;
            let vesting_vault = ctx
                .accounts
                .vesting_vault_account
                .as_ref()
                .ok_or(LaunchpoolError::MissingLeftoverAccounts)?;
            require!(
                vesting_vault.mint == ctx.accounts.token_mint.key()
                    && vesting_vault.owner == schedule.key(),
                LaunchpoolError::MissingLeftoverAccounts
            );

            schedule.beneficiary = presale.owner;
            schedule.token = presale.token;
            schedule.total_amount = leftover;
            schedule.released = 0;
            schedule.start_time = now;
            schedule.tranche_bps = presale.vesting_bps;
            schedule.tranche_interval = presale.vesting_duration;

            transfer_checked(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    TransferChecked {
                        from: ctx.accounts.token_vault_account.to_account_info(),
                        mint: ctx.accounts.token_mint.to_account_info(),
                        to: vesting_vault.to_account_info(),
                        authority: presale.to_account_info(),
                    },
                    signer_seeds,
                ),
                leftover,
                ctx.accounts.token_mint.decimals,
            )?;

            emit!(LeftoverTokensVested {
                amount: leftover,
                beneficiary: presale.owner,
            });
        }
    }

    emit!(Finalized {
        total_raised: presale.total_raised,
        tokens_sold: settlement.tokens_sold,
        timestamp: now,
    });

    Ok(())
}
