//! RV32I 指令解码与反汇编
//!
//! 数据单向流动：原始指令字 → `DecodedInstr` → 汇编字符串。
//! - `fields`: 位段提取与立即数重组
//! - `instr`: 已解码指令的和类型
//! - `decoder`: 按 opcode 分派到六种格式
//! - `mnemonic`: 二次分派并生成助记符字符串
//!
//! 所有函数无状态，可在任意线程并发调用。

mod decoder;
mod fields;
mod instr;
mod mnemonic;

pub use decoder::{decode, parse_btype, parse_itype, parse_jtype, parse_rtype, parse_stype, parse_utype};
pub use fields::*;
pub use instr::{BType, DecodedInstr, IType, InstrFormat, JType, RType, SType, UType};
pub use mnemonic::{format, mnemonic, resolve, try_format, AsmLine, FormatError, Mnemonic, Operands, INVALID_MSG};

/// 便捷函数：解码并格式化一条指令
pub fn disassemble(word: u32) -> String {
    format(decode(word))
}
