//! Educational text shown alongside a run.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const CPU_MULTIPLICATION: Section = Section {
    title: "CPU Multiplication Explained",
    lines: &[
        "Shift-and-Add Algorithm",
        "1. Initialize:",
        "   - Multiplicand in Register A",
        "   - Multiplier in Register B",
        "   - Product register with multiplier in LSBs",
        "2. For each bit (starting from LSB):",
        "   - If bit is 1, add multiplicand to accumulator",
        "   - Shift product register right (carry enters the MSB)",
        "3. After n bits, product register contains result",
    ],
};

pub const PIPO_REGISTER: Section = Section {
    title: "PIPO Shift Register Explained",
    lines: &[
        "4-bit PIPO Shift Register: inputs D3..D0, outputs Q3..Q0",
        "Parallel Load: All bits loaded simultaneously",
        "Parallel Output: All bits available at once",
        "Shift Capability: Can shift data left or right",
        "Applications: Used in arithmetic operations, serial-to-parallel conversion",
    ],
};

pub const COMBINED: Section = Section {
    title: "How They Work Together",
    lines: &[
        "Multiplier System Architecture",
        "   Multiplicand register (PIPO) feeds one adder input",
        "   Accumulator (high half of the product register) feeds the other",
        "   Adder carry-out is latched and shifted into the product MSB",
        "Multiplication Process Flow",
        "   Load -> test LSB -> add if set -> shift right -> repeat n times",
    ],
};

pub const SECTIONS: &[Section] = &[CPU_MULTIPLICATION, PIPO_REGISTER, COMBINED];
