use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{
        self,
        Token,
    },
    token_interface::{
        transfer_checked,
        Mint,
        TokenAccount,
        TokenInterface,
        TransferChecked,
    },
};
use raydium_cp_swap::{
    program::RaydiumCpSwap,
    states::AmmConfig,
};

use crate::{
    constants::{
        PRESALE_SEED,
        VAULT_SEED,
        WRAPPED_SOL_MINT_ADDRESS,
    },
    error::LaunchpoolError,
    state::{
        presale::{
            Lifecycle,
            Presale,
        },
        vault::Vault,
    },
    utils::{
        settle_raise,
        transfer_sol_from_vault,
    },
};

#[derive(Accounts)]
pub struct FinalizePool<'info> {
    pub cp_swap_program: Program<'info, RaydiumCpSwap>,

    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SEED, token_mint.key().as_ref(), presale.identifier.as_ref()],
        bump,
    )]
    pub presale: Box<Account<'info, Presale>>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    /// WSOL for native raises, the configured currency mint otherwise.
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Which config the pool belongs to.
    pub amm_config: Box<Account<'info, AmmConfig>>,

    /// CHECK: pool vault and lp mint authority
    pub authority: UncheckedAccount<'info>,

    /// CHECK: pool state account, init by cp-swap
    #[account(mut)]
    pub pool_state: UncheckedAccount<'info>,

    /// Token_0 mint, the key must smaller then token_1 mint.
    pub token_0_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token_1 mint, the key must grater then token_0 mint.
    pub token_1_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: pool lp mint, init by cp-swap
    #[account(mut)]
    pub lp_mint: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token_0_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_0_program
    )]
    pub creator_token_0: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token_1_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_1_program
    )]
    pub creator_token_1: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: creator lp ATA token account, init by cp-swap
    #[account(mut)]
    pub creator_lp_token: UncheckedAccount<'info>,

    /// CHECK: Token_0 vault for the pool, init by cp-swap
    #[account(mut)]
    pub token_0_vault: UncheckedAccount<'info>,

    /// CHECK: Token_1 vault for the pool, init by cp-swap
    #[account(mut)]
    pub token_1_vault: UncheckedAccount<'info>,

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

    /// Quote escrow owned by the presale; funded and synced in place for
    /// native raises, already funded by contributions otherwise.
    #[account(
        mut,
        constraint = quote_vault_account.mint == quote_mint.key()
            && quote_vault_account.owner == presale.key()
    )]
    pub quote_vault_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// create pool fee account
    #[account(mut)]
    pub create_pool_fee: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: an account to store oracle observations, init by cp-swap
    #[account(mut)]
    pub observation_state: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    /// Spl token program or token program 2022
    pub token_0_program: Interface<'info, TokenInterface>,
    /// Spl token program or token program 2022
    pub token_1_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn finalize_pool(ctx: Context<FinalizePool>) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let now = Clock::get()?.unix_timestamp;

    require!(
        presale.owner == ctx.accounts.owner.key(),
        LaunchpoolError::NotOwner
    );
    require!(
        presale.lifecycle == Lifecycle::Active,
        LaunchpoolError::InvalidLifecycleState
    );
    require!(presale.can_settle(now), LaunchpoolError::PresaleNotEnded);
    require!(
        presale.total_raised >= presale.soft_cap,
        LaunchpoolError::SoftCapNotReached
    );
    require!(
        !presale.liquidity_seeded,
        LaunchpoolError::LiquidityAlreadySeeded
    );

    let expected_quote = if presale.is_native() {
        WRAPPED_SOL_MINT_ADDRESS
    } else {
        presale.currency
    };
    require!(
        ctx.accounts.quote_mint.key() == expected_quote,
        LaunchpoolError::InvalidQuoteMint
    );

    let token_key = presale.token;
    let quote_key = ctx.accounts.quote_mint.key();
    let pair_matches = (ctx.accounts.token_0_mint.key() == token_key
        && ctx.accounts.token_1_mint.key() == quote_key)
        || (ctx.accounts.token_0_mint.key() == quote_key
            && ctx.accounts.token_1_mint.key() == token_key);
    require!(pair_matches, LaunchpoolError::InvalidQuoteMint);

    let settlement = settle_raise(
        presale.total_raised,
        presale.presale_rate,
        presale.listing_rate,
        presale.liquidity_bps,
        presale.fee_bps,
    )?;
    require!(
        settlement.currency_for_liquidity > 0 && settlement.tokens_for_liquidity > 0,
        LaunchpoolError::InvalidPoolReserves
    );

    // Commit the accounting before any funds move.
    presale.currency_for_liquidity = settlement.currency_for_liquidity;
    presale.token_balance = presale
        .token_balance
        .checked_sub(settlement.tokens_for_liquidity)
        .ok_or(LaunchpoolError::BalanceInvariantViolated)?;
    presale.liquidity_seeded = true;

    // Native raises wrap the pool share of the vault into the quote escrow.
    if presale.is_native() {
        transfer_sol_from_vault(
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.quote_vault_account.to_account_info(),
            settlement.currency_for_liquidity,
        )?;
        token::sync_native(CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::SyncNative {
                account: ctx.accounts.quote_vault_account.to_account_info(),
            },
        ))?;
    }

    let token_mint_key = ctx.accounts.token_mint.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        PRESALE_SEED,
        token_mint_key.as_ref(),
        presale.identifier.as_ref(),
        &[ctx.bumps.presale],
    ]];

    // Route both legs into the creator accounts cp-swap pulls from.
    let (
        creator_quote_token,
        quote_token_program,
        creator_sale_token,
        sale_token_program,
        token_0_amount,
        token_1_amount,
    ) = match ctx.accounts.token_0_mint.key() == quote_key {
        true => (
            ctx.accounts.creator_token_0.as_ref(),
            ctx.accounts.token_0_program.to_account_info(),
            ctx.accounts.creator_token_1.as_ref(),
            ctx.accounts.token_1_program.to_account_info(),
            settlement.currency_for_liquidity,
            settlement.tokens_for_liquidity,
        ),
        false => (
            ctx.accounts.creator_token_1.as_ref(),
            ctx.accounts.token_1_program.to_account_info(),
            ctx.accounts.creator_token_0.as_ref(),
            ctx.accounts.token_0_program.to_account_info(),
            settlement.tokens_for_liquidity,
            settlement.currency_for_liquidity,
        ),
    };

    transfer_checked(
        CpiContext::new_with_signer(
            quote_token_program,
            TransferChecked {
                from: ctx.accounts.quote_vault_account.to_account_info(),
                mint: ctx.accounts.quote_mint.to_account_info(),
                to: creator_quote_token.to_account_info(),
                authority: presale.to_account_info(),
            },
            signer_seeds,
        ),
        settlement.currency_for_liquidity,
        ctx.accounts.quote_mint.decimals,
    )?;

    transfer_checked(
        CpiContext::new_with_signer(
            sale_token_program,
            TransferChecked {
                from: ctx.accounts.token_vault_account.to_account_info(),
                mint: ctx.accounts.token_mint.to_account_info(),
                to: creator_sale_token.to_account_info(),
                authority: presale.to_account_info(),
            },
            signer_seeds,
        ),
        settlement.tokens_for_liquidity,
        ctx.accounts.token_mint.decimals,
    )?;

    let cpi_accounts = raydium_cp_swap::cpi::accounts::Initialize {
        creator: ctx.accounts.owner.to_account_info(),
        amm_config: ctx.accounts.amm_config.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
        pool_state: ctx.accounts.pool_state.to_account_info(),
        token_0_mint: ctx.accounts.token_0_mint.to_account_info(),
        token_1_mint: ctx.accounts.token_1_mint.to_account_info(),
        lp_mint: ctx.accounts.lp_mint.to_account_info(),
        creator_token_0: ctx.accounts.creator_token_0.to_account_info(),
        creator_token_1: ctx.accounts.creator_token_1.to_account_info(),
        creator_lp_token: ctx.accounts.creator_lp_token.to_account_info(),
        token_0_vault: ctx.accounts.token_0_vault.to_account_info(),
        token_1_vault: ctx.accounts.token_1_vault.to_account_info(),
        create_pool_fee: ctx.accounts.create_pool_fee.to_account_info(),
        observation_state: ctx.accounts.observation_state.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        token_0_program: ctx.accounts.token_0_program.to_account_info(),
        token_1_program: ctx.accounts.token_1_program.to_account_info(),
        associated_token_program: ctx.accounts.associated_token_program.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        rent: ctx.accounts.rent.to_account_info(),
    };

    let cpi_context = CpiContext::new(ctx.accounts.cp_swap_program.to_account_info(), cpi_accounts);

    // Creating the pair fails inside cp-swap if it already exists; the whole
    // instruction aborts with it, so no partial fund movement survives.
    raydium_cp_swap::cpi::initialize(cpi_context, token_0_amount, token_1_amount, 0)?;

    Ok(())
}
