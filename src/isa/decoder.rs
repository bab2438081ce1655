//! 指令解码
//!
//! 按 opcode 分派到六种格式解析函数之一。解码是全函数：
//! 任何 32-bit 字都会得到一个 `DecodedInstr`，未知 opcode 落到 `Invalid`。

use crate::isa::fields::*;
use crate::isa::instr::{BType, DecodedInstr, IType, JType, RType, SType, UType};

/// 解码一条 32-bit 指令
pub fn decode(word: u32) -> DecodedInstr {
    match opcode(word) {
        OP_LUI | OP_AUIPC => DecodedInstr::U(parse_utype(word)),
        OP_JAL => DecodedInstr::J(parse_jtype(word)),
        OP_JALR | OP_LOAD | OP_IMM | OP_SYSTEM => DecodedInstr::I(parse_itype(word)),
        OP_BRANCH => DecodedInstr::B(parse_btype(word)),
        OP_STORE => DecodedInstr::S(parse_stype(word)),
        OP_REG => DecodedInstr::R(parse_rtype(word)),
        // 只有全零字走 R-type，其余 opcode 为 0 的字一律无效
        OP_ZERO if word == 0 => DecodedInstr::R(parse_rtype(word)),
        OP_MISC_MEM => DecodedInstr::Fence { opcode: OP_MISC_MEM },
        _ => DecodedInstr::Invalid,
    }
}

pub fn parse_rtype(word: u32) -> RType {
    RType {
        opcode: opcode(word),
        rd: rd(word),
        funct3: funct3(word),
        rs1: rs1(word),
        rs2: rs2(word),
        funct7: funct7(word),
    }
}

pub fn parse_itype(word: u32) -> IType {
    IType {
        opcode: opcode(word),
        rd: rd(word),
        funct3: funct3(word),
        rs1: rs1(word),
        imm: imm_i(word),
    }
}

pub fn parse_stype(word: u32) -> SType {
    SType {
        opcode: opcode(word),
        funct3: funct3(word),
        rs1: rs1(word),
        rs2: rs2(word),
        imm: imm_s(word),
    }
}

pub fn parse_btype(word: u32) -> BType {
    BType {
        opcode: opcode(word),
        funct3: funct3(word),
        rs1: rs1(word),
        rs2: rs2(word),
        imm: imm_b(word),
    }
}

pub fn parse_utype(word: u32) -> UType {
    UType {
        opcode: opcode(word),
        rd: rd(word),
        imm: imm_u(word),
    }
}

pub fn parse_jtype(word: u32) -> JType {
    JType {
        opcode: opcode(word),
        rd: rd(word),
        imm: imm_j(word),
    }
}
