//! Instruction Assembly
//!
//! Orders the instructions of a launch transaction:
//! 1. `SetComputeUnitLimit` (bounds the whole transaction)
//! 2. `SetComputeUnitPrice` (priority fee applies to everything after it)
//! 3. pump.fun `create`
//! 4. optional buy instructions, always last (the curve must exist first)

use solana_sdk::{compute_budget::ComputeBudgetInstruction, instruction::Instruction};
use thiserror::Error;

use super::known_programs::COMPUTE_BUDGET_PROGRAM;

/// pump.fun's default compute budget for create
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 250_000;

/// Index of the create instruction in an assembled list
pub const CREATE_INSTRUCTION_INDEX: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderingError {
    #[error("Instruction list too short: {0} instructions")]
    TooShort(usize),
    #[error("Instruction {index} should be a compute budget instruction")]
    ExpectedComputeBudget { index: usize },
    #[error("Compute budget instruction found at index {index}, after program instructions")]
    LateComputeBudget { index: usize },
}

/// Build the ordered instruction list for a launch
pub fn assemble_launch_instructions(
    compute_unit_limit: u32,
    compute_unit_price: u64,
    create_ix: Instruction,
    buy_ixs: Vec<Instruction>,
) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(3 + buy_ixs.len());
    instructions.push(ComputeBudgetInstruction::set_compute_unit_limit(compute_unit_limit));
    instructions.push(ComputeBudgetInstruction::set_compute_unit_price(compute_unit_price));
    instructions.push(create_ix);
    instructions.extend(buy_ixs);
    instructions
}

/// Check that an assembled list starts with limit, price, then create,
/// and carries no compute budget instruction afterwards.
pub fn verify_instruction_order(instructions: &[Instruction]) -> Result<(), OrderingError> {
    if instructions.len() <= CREATE_INSTRUCTION_INDEX {
        return Err(OrderingError::TooShort(instructions.len()));
    }

    let expected_limit = ComputeBudgetInstruction::set_compute_unit_limit(0);
    let expected_price = ComputeBudgetInstruction::set_compute_unit_price(0);
    for (index, expected) in [(0, &expected_limit), (1, &expected_price)] {
        let ix = &instructions[index];
        // first data byte is the compute budget instruction tag
        if ix.program_id != COMPUTE_BUDGET_PROGRAM || ix.data.first() != expected.data.first() {
            return Err(OrderingError::ExpectedComputeBudget { index });
        }
    }

    if let Some(index) = instructions
        .iter()
        .enumerate()
        .skip(CREATE_INSTRUCTION_INDEX)
        .find(|(_, ix)| ix.program_id == COMPUTE_BUDGET_PROGRAM)
        .map(|(index, _)| index)
    {
        return Err(OrderingError::LateComputeBudget { index });
    }

    Ok(())
}
