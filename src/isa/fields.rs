//! 指令字段提取辅助函数
//!
//! 提供从 32-bit 指令字中提取各字段的工具函数。
//! 所有函数都是纯函数，只读取固定位段，不修改源字。

/// 从 `word` 的第 `offset` 位开始提取 `width` 位，右对齐返回
///
/// 调用方只会请求已知在范围内的字段；越界调用在 debug 构建下直接断言失败。
#[inline]
pub const fn extract(word: u32, offset: u32, width: u32) -> u32 {
    debug_assert!(width >= 1 && offset + width <= 32);
    (word >> offset) & (u32::MAX >> (32 - width))
}

/// 提取 opcode 字段 [6:0]
#[inline]
pub const fn opcode(word: u32) -> u8 {
    extract(word, 0, 7) as u8
}

/// 提取 rd 字段 [11:7]
#[inline]
pub const fn rd(word: u32) -> u8 {
    extract(word, 7, 5) as u8
}

/// 提取 funct3 字段 [14:12]
#[inline]
pub const fn funct3(word: u32) -> u8 {
    extract(word, 12, 3) as u8
}

/// 提取 rs1 字段 [19:15]
#[inline]
pub const fn rs1(word: u32) -> u8 {
    extract(word, 15, 5) as u8
}

/// 提取 rs2 字段 [24:20]
#[inline]
pub const fn rs2(word: u32) -> u8 {
    extract(word, 20, 5) as u8
}

/// 提取 funct7 字段 [31:25]
#[inline]
pub const fn funct7(word: u32) -> u8 {
    extract(word, 25, 7) as u8
}

/// 符号位 [31]，所有格式共用
#[inline]
const fn sign_bit(word: u32) -> bool {
    extract(word, 31, 1) != 0
}

/// 提取 I-type 立即数并符号扩展
/// imm[11:0] = word[31:20]，算术右移一步完成提取与扩展
#[inline]
pub const fn imm_i(word: u32) -> i16 {
    ((word as i32) >> 20) as i16
}

/// 提取 S-type 立即数并符号扩展
/// imm[11:5] = word[31:25], imm[4:0] = word[11:7]
#[inline]
pub const fn imm_s(word: u32) -> i16 {
    let imm_11_5 = extract(word, 25, 7) as u16;
    let imm_4_0 = extract(word, 7, 5) as u16;
    let mut imm = (imm_11_5 << 5) | imm_4_0;
    if sign_bit(word) {
        imm |= 0xF000;
    }
    imm as i16
}

/// 提取 B-type 立即数并符号扩展
/// imm[12] = word[31], imm[10:5] = word[30:25], imm[4:1] = word[11:8], imm[11] = word[7]
///
/// imm[0] 恒为 0，不占编码位
#[inline]
pub const fn imm_b(word: u32) -> i16 {
    let imm_12 = extract(word, 31, 1) as u16;
    let imm_11 = extract(word, 7, 1) as u16;
    let imm_10_5 = extract(word, 25, 6) as u16;
    let imm_4_1 = extract(word, 8, 4) as u16;
    let mut imm = (imm_12 << 12) | (imm_11 << 11) | (imm_10_5 << 5) | (imm_4_1 << 1);
    if sign_bit(word) {
        imm |= 0xF000;
    }
    imm as i16
}

/// 提取 U-type 立即数
/// imm[19:0] = word[31:12]，保持 20 位有符号数的单位（未左移 12 位）
#[inline]
pub const fn imm_u(word: u32) -> i32 {
    (word as i32) >> 12
}

/// 提取 J-type 立即数并符号扩展
/// imm[20] = word[31], imm[10:1] = word[30:21], imm[11] = word[20], imm[19:12] = word[19:12]
#[inline]
pub const fn imm_j(word: u32) -> i32 {
    let imm_20 = extract(word, 31, 1);
    let imm_10_1 = extract(word, 21, 10);
    let imm_11 = extract(word, 20, 1);
    let imm_19_12 = extract(word, 12, 8);
    let mut imm = (imm_20 << 20) | (imm_19_12 << 12) | (imm_11 << 11) | (imm_10_1 << 1);
    if sign_bit(word) {
        // imm[20] 以上全部置 1
        imm |= 0xFFE0_0000;
    }
    imm as i32
}

// ========== Opcode 常量 ==========
pub const OP_LUI: u8 = 0b0110111;
pub const OP_AUIPC: u8 = 0b0010111;
pub const OP_JAL: u8 = 0b1101111;
pub const OP_JALR: u8 = 0b1100111;
pub const OP_BRANCH: u8 = 0b1100011;
pub const OP_LOAD: u8 = 0b0000011;
pub const OP_STORE: u8 = 0b0100011;
pub const OP_MISC_MEM: u8 = 0b0001111;
pub const OP_IMM: u8 = 0b0010011;
pub const OP_REG: u8 = 0b0110011;
pub const OP_SYSTEM: u8 = 0b1110011;

/// 全零 opcode；仅当整个字为 0 时按 R-type 解析
pub const OP_ZERO: u8 = 0b0000000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        assert_eq!(extract(0xDEAD_BEEF, 0, 4), 0xF);
        assert_eq!(extract(0xDEAD_BEEF, 28, 4), 0xD);
        assert_eq!(extract(0xDEAD_BEEF, 8, 8), 0xBE);
        assert_eq!(extract(0xDEAD_BEEF, 0, 32), 0xDEAD_BEEF);
        assert_eq!(extract(0x8000_0000, 31, 1), 1);
    }

    #[test]
    fn test_register_fields() {
        let raw = 0x402081B3; // sub x3, x1, x2
        assert_eq!(opcode(raw), OP_REG);
        assert_eq!(rd(raw), 3);
        assert_eq!(funct3(raw), 0);
        assert_eq!(rs1(raw), 1);
        assert_eq!(rs2(raw), 2);
        assert_eq!(funct7(raw), 0x20);
    }

    #[test]
    fn test_imm_i_negative() {
        let raw = 0xFFF00113; // addi x2, x0, -1
        assert_eq!(imm_i(raw), -1);
        assert_eq!(imm_i(0x80000013), -2048);
        assert_eq!(imm_i(0x7FF00013), 2047);
    }

    #[test]
    fn test_imm_s() {
        let raw = 0x00112423; // sw x1, 8(x2)
        assert_eq!(imm_s(raw), 8);
        let raw = 0xFE112E23; // sw x1, -4(x2)
        assert_eq!(imm_s(raw), -4);
    }

    #[test]
    fn test_imm_b_positive() {
        let raw = 0x00208463; // beq x1, x2, 8
        assert_eq!(imm_b(raw), 8);
    }

    #[test]
    fn test_imm_b_negative() {
        assert_eq!(imm_b(0xFE0008E3), -16); // beq x0, x0, -16
        assert_eq!(imm_b(0xFE000CE3), -8);
        assert_eq!(imm_b(0x80000063), -4096);
    }

    #[test]
    fn test_imm_u() {
        assert_eq!(imm_u(0x123450B7), 0x12345);
        assert_eq!(imm_u(0x80000537), -524288);
    }

    #[test]
    fn test_imm_j_positive() {
        let raw = 0x0040006F; // jal x0, 4
        assert_eq!(imm_j(raw), 4);
    }

    #[test]
    fn test_imm_j_negative() {
        assert_eq!(imm_j(0xFFDFF06F), -4); // jal x0, -4
        assert_eq!(imm_j(0xFFFFF06F), -2);
        assert_eq!(imm_j(0x8000006F), -1_048_576);
    }
}
