//! rv32i_disasm: RV32I 单指令解码与反汇编库
//!
//! 把一个 32-bit RISC-V 机器码字解码为结构化表示，再生成可读的汇编助记符。
//! 面向教学反汇编器、调试器、二进制查看工具等场景。
//!
//! # 模块结构
//!
//! - `isa`: 字段提取、指令解码、助记符生成（无状态核心）
//! - `literal`: 指令字字面量解析（十六进制 / 十进制 / 八进制 / 二进制）
//! - `listing`: 反汇编清单配置与行渲染
//! - `image`: RV32 ELF 可执行段加载
//!
//! # 示例
//!
//! ```
//! use rv32i_disasm::{decode, format};
//!
//! assert_eq!(format(decode(0x00000013)), "ADDI x0 x0 0");
//! ```

pub mod image;
pub mod isa;
pub mod listing;
pub mod literal;

pub use isa::{decode, format, try_format, DecodedInstr, InstrFormat};
