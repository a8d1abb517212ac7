mod common;

use common::*;

use ls8::flags::Condition;
use ls8::{VmOptions, VM};
use proptest::prelude::*;


proptest! {

    #[test]
    fn ldi_sets_register_and_advances_three(reg in 0u8..8, imm in any::<u8>()) {
        let mut vm = machine(&[LDI, reg, imm]);
        vm.step().unwrap();
        prop_assert_eq!(vm.registers().get(reg).unwrap(), imm);
        prop_assert_eq!(vm.pc(), 3);
    }


    #[test]
    fn add_and_mul_commute_and_wrap(a in any::<u8>(), b in any::<u8>()) {
        for (op, expected) in [(ADD, a.wrapping_add(b)), (MUL, a.wrapping_mul(b))] {
            let (_, forward) = run(&[LDI, 0, a, LDI, 1, b, op, 0, 1, PRN, 0, HLT]);
            let (_, backward) = run(&[LDI, 0, a, LDI, 1, b, op, 1, 0, PRN, 1, HLT]);
            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(&forward[0], &expected.to_string());
        }
    }


    #[test]
    fn push_then_pop_is_idempotent(value in any::<u8>(), sp in 9u8..=255) {
        let mut vm = VM::new(VmOptions { stack_start: sp, trace: false }, Vec::new());
        vm.load(&[LDI, 0, value, PUSH, 0, POP, 0, HLT]).unwrap();
        vm.run().unwrap();
        prop_assert_eq!(vm.registers().get(0).unwrap(), value);
        prop_assert_eq!(vm.registers().stack_pointer(), sp);
    }


    #[test]
    fn ret_returns_to_call_site_plus_two(depth in 1usize..=20) {
        // Each frame is `LDI R1,next; CALL R1; RET`; the innermost frame is a lone RET.
        let mut code = Vec::new();
        for i in 0..depth {
            let next = 6 * (i + 1);
            code.extend_from_slice(&[LDI, 1, next as u8, CALL, 1, RET]);
        }
        code.push(RET);
        let innermost = code.len() - 1;

        let mut vm = machine(&code);
        let mut call_sites = Vec::new();
        while vm.pc() != innermost {
            if vm.memory().read(vm.pc()).unwrap() == CALL {
                call_sites.push(vm.pc());
            }
            vm.step().unwrap();
        }
        prop_assert_eq!(call_sites.len(), depth);
        prop_assert_eq!(vm.registers().stack_pointer() as usize, 0xF4 - depth);

        while let Some(site) = call_sites.pop() {
            vm.step().unwrap();
            prop_assert_eq!(vm.pc(), site + 2);
        }
        prop_assert_eq!(vm.registers().stack_pointer(), 0xF4);
    }


    #[test]
    fn cmp_sets_one_condition_and_jumps_follow_it(a in any::<u8>(), b in any::<u8>(), equal_jump in any::<bool>()) {
        let jump = if equal_jump { JEQ } else { JNE };
        let mut vm = machine(&[LDI, 0, a, LDI, 1, b, LDI, 2, 20, CMP, 0, 1, jump, 2, HLT]);
        for _ in 0..4 {
            vm.step().unwrap();
        }

        let condition = vm.flags().condition().unwrap();
        let expected = if a == b {
            Condition::Equal
        } else if a < b {
            Condition::Less
        } else {
            Condition::Greater
        };
        prop_assert_eq!(condition, expected);

        vm.step().unwrap();
        let jumped = vm.pc() == 20;
        prop_assert_eq!(jumped, (a == b) == equal_jump);
        if !jumped {
            prop_assert_eq!(vm.pc(), 14);
        }
    }

}
