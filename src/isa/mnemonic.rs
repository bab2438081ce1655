//! 助记符生成
//!
//! 对 `DecodedInstr` 做穷尽匹配，再按 opcode + funct3（必要时 funct7 / imm）二次分派，
//! 得到助记符和操作数布局。寄存器一律输出原始编号 `x<n>`，不做 ABI 别名。
//!
//! 格式化是全函数：任何落在表外的字段组合都输出 [`INVALID_MSG`]。

use std::collections::TryReserveError;
use std::fmt::{self, Write};

use thiserror::Error;

use crate::isa::fields::{OP_AUIPC, OP_IMM, OP_JAL, OP_JALR, OP_LOAD, OP_LUI, OP_SYSTEM};
use crate::isa::instr::{BType, DecodedInstr, IType, JType, RType, SType, UType};

/// 无法识别的编码统一输出的占位串
pub const INVALID_MSG: &str = "Invalid instruction";

/// 单行输出的预留容量，足以容纳表中任意一条指令
const LINE_CAPACITY: usize = 64;

/// 格式化错误
#[derive(Error, Debug)]
pub enum FormatError {
    /// 输出缓冲区分配失败
    #[error("failed to allocate mnemonic buffer: {0}")]
    Alloc(#[from] TryReserveError),
    /// 写入 `String` 本身不会失败；仅当某个 `Display` 实现返回错误时出现，
    /// 此时向调用方传播而不是 panic
    #[error("failed to render mnemonic")]
    Fmt(#[from] fmt::Error),
}

/// RV32I 助记符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // R-type
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    // I-type
    Jalr,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Ecall,
    Ebreak,
    // S-type
    Sb,
    Sh,
    Sw,
    // B-type
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    // U/J
    Lui,
    Auipc,
    Jal,
    Fence,
}

impl Mnemonic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Add => "ADD",
            Mnemonic::Sub => "SUB",
            Mnemonic::Sll => "SLL",
            Mnemonic::Slt => "SLT",
            Mnemonic::Sltu => "SLTU",
            Mnemonic::Xor => "XOR",
            Mnemonic::Srl => "SRL",
            Mnemonic::Sra => "SRA",
            Mnemonic::Or => "OR",
            Mnemonic::And => "AND",
            Mnemonic::Jalr => "JALR",
            Mnemonic::Lb => "LB",
            Mnemonic::Lh => "LH",
            Mnemonic::Lw => "LW",
            Mnemonic::Lbu => "LBU",
            Mnemonic::Lhu => "LHU",
            Mnemonic::Addi => "ADDI",
            Mnemonic::Slti => "SLTI",
            // 沿用既有输出，与寄存器版同名
            Mnemonic::Sltiu => "SLTU",
            Mnemonic::Xori => "XORI",
            Mnemonic::Ori => "ORI",
            Mnemonic::Andi => "ANDI",
            Mnemonic::Slli => "SLLI",
            Mnemonic::Srli => "SRLI",
            Mnemonic::Srai => "SRAI",
            Mnemonic::Ecall => "ECALL",
            Mnemonic::Ebreak => "EBREAK",
            Mnemonic::Sb => "SB",
            Mnemonic::Sh => "SH",
            Mnemonic::Sw => "SW",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bne => "BNE",
            Mnemonic::Blt => "BLT",
            Mnemonic::Bge => "BGE",
            Mnemonic::Bltu => "BLTU",
            Mnemonic::Bgeu => "BGEU",
            Mnemonic::Lui => "LUI",
            Mnemonic::Auipc => "AUIPC",
            Mnemonic::Jal => "JAL",
            Mnemonic::Fence => "FENCE",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 操作数布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// 无操作数（ECALL/EBREAK/FENCE）
    None,
    /// `rd rs1 rs2`
    RegReg { rd: u8, rs1: u8, rs2: u8 },
    /// `rd rs1 imm`
    RegImm { rd: u8, rs1: u8, imm: i32 },
    /// `rd imm(rs1)`
    Load { rd: u8, base: u8, offset: i32 },
    /// `rs2 imm(rs1)`
    Store { src: u8, base: u8, offset: i32 },
    /// `rs1 rs2 offset`
    Branch { rs1: u8, rs2: u8, offset: i32 },
    /// `rd imm`
    Upper { rd: u8, imm: i32 },
}

/// 一行汇编：助记符 + 操作数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsmLine {
    pub mnemonic: Mnemonic,
    pub operands: Operands,
}

impl AsmLine {
    const fn new(mnemonic: Mnemonic, operands: Operands) -> Self {
        Self { mnemonic, operands }
    }
}

impl fmt::Display for AsmLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic.as_str())?;
        match self.operands {
            Operands::None => Ok(()),
            Operands::RegReg { rd, rs1, rs2 } => write!(f, " x{rd} x{rs1} x{rs2}"),
            Operands::RegImm { rd, rs1, imm } => write!(f, " x{rd} x{rs1} {imm}"),
            Operands::Load { rd, base, offset } => write!(f, " x{rd} {offset}(x{base})"),
            Operands::Store { src, base, offset } => write!(f, " x{src} {offset}(x{base})"),
            Operands::Branch { rs1, rs2, offset } => write!(f, " x{rs1} x{rs2} {offset}"),
            Operands::Upper { rd, imm } => write!(f, " x{rd} {imm}"),
        }
    }
}

/// 查表得到助记符与操作数；表外组合返回 `None`
pub fn resolve(instr: DecodedInstr) -> Option<AsmLine> {
    match instr {
        DecodedInstr::R(r) => resolve_rtype(r),
        DecodedInstr::I(i) => resolve_itype(i),
        DecodedInstr::S(s) => resolve_stype(s),
        DecodedInstr::B(b) => resolve_btype(b),
        DecodedInstr::U(u) => resolve_utype(u),
        DecodedInstr::J(j) => resolve_jtype(j),
        DecodedInstr::Fence { .. } => Some(AsmLine::new(Mnemonic::Fence, Operands::None)),
        DecodedInstr::Invalid => None,
    }
}

fn resolve_rtype(r: RType) -> Option<AsmLine> {
    let mnemonic = match (r.funct3, r.funct7) {
        (0b000, 0x00) => Mnemonic::Add,
        (0b000, 0x20) => Mnemonic::Sub,
        (0b001, _) => Mnemonic::Sll,
        (0b010, _) => Mnemonic::Slt,
        (0b011, _) => Mnemonic::Sltu,
        (0b100, _) => Mnemonic::Xor,
        (0b101, 0x00) => Mnemonic::Srl,
        (0b101, 0x20) => Mnemonic::Sra,
        (0b110, _) => Mnemonic::Or,
        (0b111, _) => Mnemonic::And,
        _ => return None,
    };
    let operands = Operands::RegReg { rd: r.rd, rs1: r.rs1, rs2: r.rs2 };
    Some(AsmLine::new(mnemonic, operands))
}

fn resolve_itype(i: IType) -> Option<AsmLine> {
    let imm = i32::from(i.imm);
    let reg_imm = Operands::RegImm { rd: i.rd, rs1: i.rs1, imm };
    let shift = Operands::RegImm { rd: i.rd, rs1: i.rs1, imm: i32::from(i.shamt()) };

    let (mnemonic, operands) = match i.opcode {
        OP_JALR => (Mnemonic::Jalr, reg_imm),
        OP_LOAD => {
            let mnemonic = match i.funct3 {
                0b000 => Mnemonic::Lb,
                0b001 => Mnemonic::Lh,
                0b010 => Mnemonic::Lw,
                0b100 => Mnemonic::Lbu,
                0b101 => Mnemonic::Lhu,
                _ => return None,
            };
            (mnemonic, Operands::Load { rd: i.rd, base: i.rs1, offset: imm })
        }
        OP_IMM => match (i.funct3, i.shift_funct7()) {
            (0b000, _) => (Mnemonic::Addi, reg_imm),
            (0b010, _) => (Mnemonic::Slti, reg_imm),
            (0b011, _) => (Mnemonic::Sltiu, reg_imm),
            (0b100, _) => (Mnemonic::Xori, reg_imm),
            (0b110, _) => (Mnemonic::Ori, reg_imm),
            (0b111, _) => (Mnemonic::Andi, reg_imm),
            (0b001, _) => (Mnemonic::Slli, shift),
            (0b101, 0x00) => (Mnemonic::Srli, shift),
            (0b101, 0x20) => (Mnemonic::Srai, shift),
            // imm 恰为 0x20 也视为 SRAI，移位量为 0
            (0b101, _) if i.imm == 0x20 => (Mnemonic::Srai, shift),
            _ => return None,
        },
        OP_SYSTEM => match i.imm {
            0 => (Mnemonic::Ecall, Operands::None),
            1 => (Mnemonic::Ebreak, Operands::None),
            _ => return None,
        },
        _ => return None,
    };
    Some(AsmLine::new(mnemonic, operands))
}

fn resolve_stype(s: SType) -> Option<AsmLine> {
    let mnemonic = match s.funct3 {
        0b000 => Mnemonic::Sb,
        0b001 => Mnemonic::Sh,
        0b010 => Mnemonic::Sw,
        _ => return None,
    };
    let operands = Operands::Store { src: s.rs2, base: s.rs1, offset: i32::from(s.imm) };
    Some(AsmLine::new(mnemonic, operands))
}

fn resolve_btype(b: BType) -> Option<AsmLine> {
    let mnemonic = match b.funct3 {
        0b000 => Mnemonic::Beq,
        0b001 => Mnemonic::Bne,
        0b100 => Mnemonic::Blt,
        0b101 => Mnemonic::Bge,
        0b110 => Mnemonic::Bltu,
        0b111 => Mnemonic::Bgeu,
        _ => return None,
    };
    let operands = Operands::Branch { rs1: b.rs1, rs2: b.rs2, offset: i32::from(b.imm) };
    Some(AsmLine::new(mnemonic, operands))
}

fn resolve_utype(u: UType) -> Option<AsmLine> {
    let mnemonic = match u.opcode {
        OP_LUI => Mnemonic::Lui,
        OP_AUIPC => Mnemonic::Auipc,
        _ => return None,
    };
    Some(AsmLine::new(mnemonic, Operands::Upper { rd: u.rd, imm: u.imm }))
}

fn resolve_jtype(j: JType) -> Option<AsmLine> {
    if j.opcode != OP_JAL {
        return None;
    }
    Some(AsmLine::new(Mnemonic::Jal, Operands::Upper { rd: j.rd, imm: j.imm }))
}

/// 仅取助记符
pub fn mnemonic(instr: DecodedInstr) -> Option<Mnemonic> {
    resolve(instr).map(|line| line.mnemonic)
}

impl fmt::Display for DecodedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match resolve(*self) {
            Some(line) => fmt::Display::fmt(&line, f),
            None => f.write_str(INVALID_MSG),
        }
    }
}

/// 格式化为汇编字符串
///
/// 全函数，不会失败；返回的 `String` 由调用方持有。
pub fn format(instr: DecodedInstr) -> String {
    instr.to_string()
}

/// 与 [`format`] 输出相同，但输出缓冲区分配失败时返回错误而不是中止进程
pub fn try_format(instr: DecodedInstr) -> Result<String, FormatError> {
    let mut out = String::new();
    out.try_reserve(LINE_CAPACITY)?;
    write!(out, "{instr}")?;
    Ok(out)
}
