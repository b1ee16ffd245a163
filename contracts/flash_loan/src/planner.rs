//! Composes the cyclic path a flash loan is run through.
//!
//! Every registered pool that holds enough of the token is tried as lender.
//! For each, simple cycles of up to `MAX_HOPS` swaps from the token back to
//! itself are enumerated over the other pools and quoted against current
//! reserves. The cycle with the largest output wins; ties keep the first
//! one found, so the result is deterministic for a given pool order.

use soroban_sdk::{contracttype, Address, Env, Vec};

use flashswap_interface::{
    math::{compute_flash_fee, get_amount_out},
    Hop, PoolClient, MAX_HOPS,
};

use crate::errors::FlashLoanError;

/// Registry capacity; pool usage is tracked in a `u32` bitmask.
pub const MAX_POOLS: u32 = 16;

/// Snapshot of one pool taken before planning.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolView {
    pub address: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub reserve_a: i128,
    pub reserve_b: i128,
    pub fee_bps: u32,
}

impl PoolView {
    /// `(token_out, reserve_in, reserve_out)` when selling `token_in` here.
    fn sell(&self, token_in: &Address) -> Option<(Address, i128, i128)> {
        if *token_in == self.token_a {
            Some((self.token_b.clone(), self.reserve_a, self.reserve_b))
        } else if *token_in == self.token_b {
            Some((self.token_a.clone(), self.reserve_b, self.reserve_a))
        } else {
            None
        }
    }

    fn reserve_of(&self, token: &Address) -> Option<i128> {
        if *token == self.token_a {
            Some(self.reserve_a)
        } else if *token == self.token_b {
            Some(self.reserve_b)
        } else {
            None
        }
    }
}

/// The best cycle for a loan, with its expected economics.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleQuote {
    pub lender: Address,
    /// True when the loan token is the lender's `token_a`.
    pub lends_a: bool,
    pub hops: Vec<Hop>,
    pub amount_in: i128,
    pub amount_out: i128,
    pub fee: i128,
    pub repay: i128,
    pub profit: i128,
}

pub fn load_pools(env: &Env, pools: &Vec<Address>) -> Vec<PoolView> {
    let mut views = Vec::new(env);
    for address in pools.iter() {
        let pool = PoolClient::new(env, &address);
        let (token_a, token_b) = pool.tokens();
        let (reserve_a, reserve_b, _) = pool.get_reserves();
        views.push_back(PoolView {
            address,
            token_a,
            token_b,
            reserve_a,
            reserve_b,
            fee_bps: pool.get_current_fee_bps(),
        });
    }
    views
}

/// Quotes `amount` through one pool.
///
/// `Some(0)` is dust: the executor stops the cycle there and the loan fails
/// at repayment. `None` means the pool cannot price the hop at all (empty
/// reserves, overflow); such a hop would abort the executor, so it is never
/// planned. A zero amount only arises behind a dust hop and is carried on.
fn quote_hop(amount: i128, reserve_in: i128, reserve_out: i128, fee_bps: u32) -> Option<i128> {
    if reserve_in <= 0 || reserve_out <= 0 {
        return None;
    }
    if amount == 0 {
        return Some(0);
    }
    get_amount_out(amount, reserve_in, reserve_out, fee_bps)
}

fn visited(path: &Vec<Hop>, token: &Address) -> bool {
    path.iter().any(|hop| hop.token_in == *token)
}

struct Search<'a> {
    views: &'a Vec<PoolView>,
    start: Address,
    lender: u32,
    best: Option<(i128, Vec<Hop>)>,
}

impl<'a> Search<'a> {
    fn extend(&mut self, current: &Address, amount: i128, used: u32, path: &mut Vec<Hop>) {
        for index in 0..self.views.len() {
            if index == self.lender || used & (1 << index) != 0 {
                continue;
            }
            let view = self.views.get_unchecked(index);
            let Some((token_out, reserve_in, reserve_out)) = view.sell(current) else {
                continue;
            };
            let closes = token_out == self.start;
            if !closes && visited(path, &token_out) {
                continue;
            }

            let Some(amount_out) = quote_hop(amount, reserve_in, reserve_out, view.fee_bps) else {
                continue;
            };
            path.push_back(Hop {
                pool: view.address.clone(),
                token_in: current.clone(),
                token_out: token_out.clone(),
            });

            if closes {
                let better = match &self.best {
                    Some((best_out, _)) => amount_out > *best_out,
                    None => true,
                };
                if better {
                    self.best = Some((amount_out, path.clone()));
                }
            } else if path.len() < MAX_HOPS {
                self.extend(&token_out, amount_out, used | (1 << index), path);
            }

            path.pop_back();
        }
    }
}

/// Picks the lender and cycle that return the most of `token` for `amount`.
pub fn best_cycle(
    env: &Env,
    views: &Vec<PoolView>,
    token: &Address,
    amount: i128,
) -> Result<CycleQuote, FlashLoanError> {
    let mut found_lender = false;
    let mut best: Option<CycleQuote> = None;

    for index in 0..views.len() {
        let lender = views.get_unchecked(index);
        match lender.reserve_of(token) {
            Some(reserve) if reserve >= amount => {}
            _ => continue,
        }
        found_lender = true;

        let mut search = Search {
            views,
            start: token.clone(),
            lender: index,
            best: None,
        };
        let mut path = Vec::new(env);
        search.extend(token, amount, 0, &mut path);

        let Some((amount_out, hops)) = search.best else {
            continue;
        };
        let better = match &best {
            Some(quote) => amount_out > quote.amount_out,
            None => true,
        };
        if !better {
            continue;
        }

        let fee = compute_flash_fee(amount, lender.fee_bps);
        let repay = amount.checked_add(fee).ok_or(FlashLoanError::Overflow)?;
        best = Some(CycleQuote {
            lender: lender.address.clone(),
            lends_a: *token == lender.token_a,
            hops,
            amount_in: amount,
            amount_out,
            fee,
            repay,
            profit: amount_out - repay,
        });
    }

    match best {
        Some(quote) => Ok(quote),
        None if found_lender => Err(FlashLoanError::NoCycle),
        None => Err(FlashLoanError::NoLender),
    }
}
