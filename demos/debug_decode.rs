// 调试脚本：打印若干指令字的解码结果与助记符

use rv32i_disasm::isa::{decode, format, DecodedInstr};

fn main() {
    println!("=== 解码 / 格式化对照 ===\n");

    let test_cases: &[(u32, &str)] = &[
        (0x00000013, "addi x0, x0, 0 (nop)"),
        (0x80000537, "lui x10, 0x80000"),
        (0xFE0008E3, "beq x0, x0, -16"),
        (0x0041D663, "bge x3, x4, 12"),
        (0xFE112E23, "sw x1, -4(x2)"),
        (0xFFDFF06F, "jal x0, -4"),
        (0x41F35293, "srai x5, x6, 31"),
        (0x0000000F, "fence"),
        (0x00000000, "all-zero word"),
        (0xFFFFFFFF, "unknown opcode"),
    ];

    for (raw, desc) in test_cases {
        let decoded = decode(*raw);
        println!("指令: {} (0x{:08X})", desc, raw);
        println!("  格式: {}", decoded.format_kind());
        println!("  解码结果: {:?}", decoded);

        match decoded {
            DecodedInstr::B(b) => println!("  分支偏移: {}", b.imm),
            DecodedInstr::J(j) => println!("  跳转偏移: {}", j.imm),
            DecodedInstr::U(u) => println!("  高位值: 0x{:08x}", u.upper_value()),
            _ => {}
        }
        println!("  输出: {}", format(decoded));
        println!();
    }
}
