//! 已解码指令的结构化表示
//!
//! 每种编码格式对应一个字段结构体，`DecodedInstr` 用带载荷的枚举把它们
//! 合成一个和类型：标签在解码时确定一次，之后只能通过模式匹配访问对应字段。

/// 指令编码格式（即 `DecodedInstr` 的标签）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrFormat {
    /// 寄存器-寄存器
    R,
    /// 立即数
    I,
    /// 存储
    S,
    /// 分支
    B,
    /// 高位立即数
    U,
    /// 跳转
    J,
    /// 内存栅栏
    Fence,
    /// 未知 opcode
    Invalid,
}

impl std::fmt::Display for InstrFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InstrFormat::R => "R-type",
            InstrFormat::I => "I-type",
            InstrFormat::S => "S-type",
            InstrFormat::B => "B-type",
            InstrFormat::U => "U-type",
            InstrFormat::J => "J-type",
            InstrFormat::Fence => "FENCE",
            InstrFormat::Invalid => "INVALID",
        };
        f.write_str(name)
    }
}

/// R-type: ADD/SUB/SLL/... 等寄存器运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RType {
    pub opcode: u8,
    pub rd: u8,
    pub funct3: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub funct7: u8,
}

/// I-type: Load、立即数运算、JALR、ECALL/EBREAK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IType {
    pub opcode: u8,
    pub rd: u8,
    pub funct3: u8,
    pub rs1: u8,
    /// 12 位有符号立即数
    pub imm: i16,
}

impl IType {
    /// 移位立即数指令中 imm[11:5] 充当 funct7
    #[inline]
    pub fn shift_funct7(&self) -> u8 {
        (((self.imm as u16) >> 5) & 0x7F) as u8
    }

    /// 移位量 imm[4:0]
    #[inline]
    pub fn shamt(&self) -> u8 {
        (self.imm & 0x1F) as u8
    }
}

/// S-type: SB/SH/SW
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SType {
    pub opcode: u8,
    pub funct3: u8,
    pub rs1: u8,
    pub rs2: u8,
    /// 12 位有符号偏移
    pub imm: i16,
}

/// B-type: 条件分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BType {
    pub opcode: u8,
    pub funct3: u8,
    pub rs1: u8,
    pub rs2: u8,
    /// 13 位有符号偏移，bit 0 恒为 0
    pub imm: i16,
}

/// U-type: LUI/AUIPC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UType {
    pub opcode: u8,
    pub rd: u8,
    /// 20 位有符号立即数，单位为 4 KiB
    pub imm: i32,
}

impl UType {
    /// 左移 12 位后的实际值（LUI 写入 rd 的值 / AUIPC 加到 pc 上的值）
    #[inline]
    pub fn upper_value(&self) -> u32 {
        (self.imm as u32) << 12
    }
}

/// J-type: JAL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JType {
    pub opcode: u8,
    pub rd: u8,
    /// 21 位有符号偏移，bit 0 恒为 0
    pub imm: i32,
}

/// 已解码的指令
///
/// 标签与载荷绑定在一起，读取非活跃成员在类型层面不可能发生。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedInstr {
    R(RType),
    I(IType),
    S(SType),
    B(BType),
    U(UType),
    J(JType),
    /// FENCE：不建模操作数
    Fence { opcode: u8 },
    /// opcode 不属于任何已知格式
    Invalid,
}

impl DecodedInstr {
    /// 指令格式标签
    pub fn format_kind(&self) -> InstrFormat {
        match self {
            DecodedInstr::R(_) => InstrFormat::R,
            DecodedInstr::I(_) => InstrFormat::I,
            DecodedInstr::S(_) => InstrFormat::S,
            DecodedInstr::B(_) => InstrFormat::B,
            DecodedInstr::U(_) => InstrFormat::U,
            DecodedInstr::J(_) => InstrFormat::J,
            DecodedInstr::Fence { .. } => InstrFormat::Fence,
            DecodedInstr::Invalid => InstrFormat::Invalid,
        }
    }

    /// 7 位 opcode；`Invalid` 没有保存 opcode
    pub fn opcode(&self) -> Option<u8> {
        match self {
            DecodedInstr::R(r) => Some(r.opcode),
            DecodedInstr::I(i) => Some(i.opcode),
            DecodedInstr::S(s) => Some(s.opcode),
            DecodedInstr::B(b) => Some(b.opcode),
            DecodedInstr::U(u) => Some(u.opcode),
            DecodedInstr::J(j) => Some(j.opcode),
            DecodedInstr::Fence { opcode } => Some(*opcode),
            DecodedInstr::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, DecodedInstr::Invalid)
    }
}
