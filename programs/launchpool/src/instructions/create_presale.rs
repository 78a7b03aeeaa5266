use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    Mint,
    TokenInterface,
};

use crate::{
    constants::{
        FACTORY_PROGRAM_ID,
        PRESALE_SEED,
    },
    error::LaunchpoolError,
    state::presale::{
        Lifecycle,
        Presale,
        PresaleOptions,
    },
};

#[derive(Accounts)]
#[instruction(options: PresaleOptions)]
pub struct CreatePresale<'info> {
    #[account(
        init,
        payer = owner,
        seeds = [PRESALE_SEED, token.key().as_ref(), options.identifier.as_ref()],
        bump,
        space = 8 + Presale::INIT_SPACE
    )]
    pub presale: Box<Account<'info, Presale>>,

    pub token: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: co-signing PDA owned by the deploying factory
    #[account(signer, owner = FACTORY_PROGRAM_ID @ LaunchpoolError::NotFactory)]
    pub factory_pda: AccountInfo<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn create_presale(ctx: Context<CreatePresale>, options: PresaleOptions) -> Result<()> {
    require!(
        ctx.accounts.factory_pda.is_signer,
        LaunchpoolError::NotFactory
    );

    options.validate()?;

    let presale = &mut ctx.accounts.presale;

    presale.owner = ctx.accounts.owner.key();
    presale.token = ctx.accounts.token.key();
    presale.currency = options.currency;
    presale.fee_collector = options.fee_collector;
    presale.fee_bps = options.fee_bps;
    presale.token_deposit = options.token_deposit;
    presale.hard_cap = options.hard_cap;
    presale.soft_cap = options.soft_cap;
    presale.min_contribution = options.min_contribution;
    presale.max_contribution = options.max_contribution;
    presale.presale_rate = options.presale_rate;
    presale.listing_rate = options.listing_rate;
    presale.liquidity_bps = options.liquidity_bps;
    presale.slippage_bps = options.slippage_bps;
    presale.start_time = options.start_time;
    presale.end_time = options.end_time;
    presale.lockup_duration = options.lockup_duration;
    presale.vesting_bps = options.vesting_bps;
    presale.vesting_duration = options.vesting_duration;
    presale.leftover_option = options.leftover_option;
    presale.whitelist_kind = options.whitelist_kind;
    presale.merkle_root = options.merkle_root;
    presale.nft_collection = options.nft_collection;
    presale.lifecycle = Lifecycle::Pending;
    presale.paused = false;
    presale.total_raised = 0;
    presale.tokens_sold = 0;
    presale.token_balance = 0;
    presale.tokens_liquidity = 0;
    presale.currency_for_liquidity = 0;
    presale.liquidity_seeded = false;
    presale.liquidity_locked = false;
    presale.claim_deadline = 0;
    presale.identifier = options.identifier;

    Ok(())
}
