//! Tests for the analyzer module

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::analyzer::classifier::*;
    use crate::analyzer::input_type::{decode, decode_all};
    use crate::config::AssemblerConfig;
    use crate::errors::ReconstructionError;
    use crate::models::{Attr, ButtonType, Menu, MenuItem, MenuType, Origin, ViewKind};
    use crate::program::{ConcreteValue, ConstantOracle, InstrSite, MethodBody, Operand, Program, ValueRef};
    use rand::Rng;

    const FIND: &str = "android.view.View findViewById(int)";
    const SET_CONTENT: &str = "void setContentView(int)";
    const SET_TEXT: &str = "void setText(java.lang.CharSequence)";
    const ON_CLICK: &str = "void setOnClickListener(android.view.View$OnClickListener)";
    const ADD_VIEW: &str = "void addView(android.view.View)";
    const INFLATE_3: &str = "android.view.View inflate(int,android.view.ViewGroup,boolean)";
    const CHILD_AT: &str = "android.view.View getChildAt(int)";
    const ON_CREATE: &str = "void onCreate(android.os.Bundle)";

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn main_activity() -> Origin {
        Origin::activity("com.example.MainActivity", "Main")
    }

    fn lookup_pair(program: &mut Program) -> usize {
        program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)])
                .assign_new("$r2", "android.widget.Button"),
        )
    }

    // Input types

    #[test]
    fn test_decode_table() {
        let cases = [
            (0x0, ""),
            (0x11, "uri"),
            (0x21, "email"),
            (0xD1, "email"),
            (0x31, "email_subject"),
            (0x41, "short_message"),
            (0x51, "long_message"),
            (0x61, "person_name"),
            (0x71, "address"),
            (0x81, "password"),
            (0xE1, "password"),
            (0x91, "visible_password"),
            (0xA1, "web_edit_text"),
            (0xB1, "text_filter"),
            (0xC1, "text_phonetic"),
            (0x1, "text"),
            (0xF1, "text"),
            (0x2, "number"),
            (0x12, "numeric_password"),
            (0x22, "number"),
            (0x3, "phone"),
            (0x93, "phone"),
            (0x4, "date_time"),
            (0x14, "date"),
            (0x24, "time"),
            (0x5, ""),
            (0xF, ""),
        ];
        for (mask, expected) in cases {
            assert_eq!(decode(mask), expected, "mask {:#x}", mask);
        }
    }

    #[test]
    fn test_decode_ignores_flag_bits() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let mask: i32 = rng.gen_range(0..0x1000);
            let flags: i32 = rng.gen_range(0..0x8_0000) << 12;
            assert_eq!(decode(mask | flags), decode(mask));
        }
        assert_eq!(decode(0x21 | 0x0002_0000), "email");
        assert_eq!(decode(-1 & !0xFFF), "");
    }

    #[test]
    fn test_decode_all_keeps_duplicates() {
        let masks = [0x81, 0xE1, 0x2];
        assert_eq!(decode_all(masks.iter()), vec!["password", "password", "number"]);
    }

    // Classifier

    #[test]
    fn test_signature_helpers() {
        assert_eq!(call_name(CHILD_AT), "getChildAt");
        assert_eq!(call_params(CHILD_AT), vec!["int"]);
        assert_eq!(call_params(INFLATE_3), vec!["int", "android.view.ViewGroup", "boolean"]);
        assert!(call_params("android.widget.ListView getListView()").is_empty());
        assert_eq!(call_name("noparens"), "noparens");
    }

    #[test]
    fn test_lookup_pair_resolves_both_ways() {
        let mut program = Program::new();
        let method = lookup_pair(&mut program);
        let lookup = InstrSite::new(method, 0);
        let construction = InstrSite::new(method, 1);

        assert!(is_find_view_by_id(&program, lookup));
        assert!(is_find_view_by_id(&program, construction));
        assert_eq!(get_construction_instruction(&program, lookup).unwrap(), construction);
        assert_eq!(get_construction_instruction(&program, construction).unwrap(), construction);
        assert_eq!(get_lookup_instruction(&program, construction).unwrap(), lookup);
        assert_eq!(get_lookup_instruction(&program, lookup).unwrap(), lookup);
    }

    #[test]
    fn test_lookup_found_behind_cast() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)])
                .other(Some("$r2")),
        );
        let lookup = InstrSite::new(method, 0);
        let cast = InstrSite::new(method, 1);

        assert!(is_find_view_by_id(&program, cast));
        assert_eq!(get_lookup_instruction(&program, cast).unwrap(), lookup);
        assert_eq!(get_lookup_instruction(&program, lookup).unwrap(), lookup);
    }

    #[test]
    fn test_lookup_behind_plain_statement_is_contract_failure() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .call(Some("r0"), FIND, vec![Operand::Int(7)])
                .other(Some("$r2")),
        );
        assert!(get_lookup_instruction(&program, InstrSite::new(method, 1)).is_err());
    }

    #[test]
    fn test_unpaired_lookup_is_contract_failure() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)])
                .call(Some("$r1"), SET_TEXT, vec![Operand::Str("OK".into())]),
        );
        let lookup = InstrSite::new(method, 0);

        let err = get_construction_instruction(&program, lookup).unwrap_err();
        match &err {
            ReconstructionError::MalformedIdiom { method, .. } => assert_eq!(method, ON_CREATE),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_contract_failure());
    }

    #[test]
    fn test_lookup_at_body_end_is_contract_failure() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE).assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)]),
        );
        assert!(get_construction_instruction(&program, InstrSite::new(method, 0)).is_err());
    }

    #[test]
    fn test_constructor_without_lookup_is_contract_failure() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .other(Some("$r1"))
                .assign_new("$r2", "android.widget.Button"),
        );
        let site = InstrSite::new(method, 1);

        assert!(!is_find_view_by_id(&program, site));
        assert!(get_lookup_instruction(&program, site).is_err());
        assert!(get_construction_instruction(&program, site).is_err());
    }

    #[test]
    fn test_get_child_at_pair() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r3", Some("$r1"), CHILD_AT, vec![Operand::Int(0)])
                .assign_new("$r4", "android.widget.TextView")
                .assign_call("$r5", Some("$r1"), "android.view.View getChildAt(long)", vec![Operand::Int(0)]),
        );
        let call = InstrSite::new(method, 0);
        let construction = InstrSite::new(method, 1);

        assert!(is_get_child_at(&program, call));
        assert!(is_get_child_at(&program, construction));
        assert!(!is_get_child_at(&program, InstrSite::new(method, 2)));
        assert_eq!(get_construction_from_get_child_at(&program, call).unwrap(), construction);
        assert_eq!(get_construction_from_get_child_at(&program, construction).unwrap(), construction);
    }

    #[test]
    fn test_single_instruction_predicates() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .call(Some("$r1"), ADD_VIEW, vec![Operand::Local("$r2".into())])
                .assign_call(
                    "$r3",
                    Some("$r9"),
                    "android.view.View getView(int,android.view.View,android.view.ViewGroup)",
                    vec![],
                )
                .assign_call("$r4", Some("$r8"), INFLATE_3, vec![Operand::Int(1), Operand::Null, Operand::Int(0)])
                .assign_call("$r5", Some("r0"), "android.widget.ListView getListView()", vec![])
                .assign_null("$r6")
                .assign_new("$r7", "android.widget.EditText"),
        );
        let site = |index| InstrSite::new(method, index);

        assert!(is_add_view(&program, site(0)));
        assert!(is_get_view(&program, site(1)));
        assert!(is_inflate(&program, site(2)));
        assert!(is_get_list_view(&program, site(3)));
        assert!(is_null_assignment(&program, site(4)));
        assert!(is_new_expression(&program, site(5)));

        assert!(!is_add_view(&program, site(1)));
        assert!(!is_new_expression(&program, site(4)));
        assert!(!is_null_assignment(&program, site(5)));
        assert!(!is_find_view_by_id(&program, site(5)));
    }

    #[test]
    fn test_classify_orders_by_precedence() {
        let mut program = Program::new();
        let method = lookup_pair(&mut program);
        let construction = InstrSite::new(method, 1);

        assert_eq!(
            classify(&program, construction),
            vec![Idiom::FindViewById, Idiom::NewExpression]
        );
        assert_eq!(primary_idiom(&program, construction), Some(Idiom::FindViewById));

        let other = program.add_method(MethodBody::new("void f()").other(None));
        assert_eq!(primary_idiom(&program, InstrSite::new(other, 0)), None);
    }

    // Provenance

    #[test]
    fn test_origin_tracker_multimaps() {
        let mut model = crate::models::UiModel::new();
        let button = model.create_view(1, "android.widget.Button");
        let guid = model.get(button).guid();
        let main = main_activity();
        let detail = Origin::fragment("com.example.DetailFragment");

        let mut tracker = OriginTracker::new();
        assert!(tracker.tag_element(guid, &main));
        assert!(!tracker.tag_element(guid, &main));
        tracker.tag_element(guid, &detail);
        tracker.tag_api(FIND, &main);

        assert_eq!(tracker.origins_of(guid).count(), 2);
        assert_eq!(tracker.elements_of(&detail).collect::<Vec<_>>(), vec![guid]);
        assert_eq!(tracker.apis_of(&main).collect::<Vec<_>>(), vec![FIND]);
        assert_eq!(tracker.origins_of_api(FIND).collect::<Vec<_>>(), vec![&main]);
        assert_eq!(tracker.apis_of(&detail).count(), 0);
        assert_eq!(tracker.origins().len(), 2);
    }

    // Assembler

    /// Layout 100: LinearLayout(10) -> [Button(7), EditText(8)]
    fn assembler_with_layout() -> TreeAssembler<InstrSite> {
        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let model = assembler.model_mut();
        let root = model.create_group(10, "android.widget.LinearLayout");
        let button = model.create_text(7, "android.widget.Button");
        let input = model.create_text(8, "android.widget.EditText");
        model.add_children(root, &[button, input]).unwrap();
        assembler.register_layout(100, LayoutTemplate::View(root)).unwrap();
        assembler
    }

    fn sites(program: &Program, method: usize) -> Vec<InstrSite> {
        program.sites(method)
    }

    #[test]
    fn test_assemble_lookup_in_content_view() {
        init_logger();
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .call(Some("r0"), SET_CONTENT, vec![Operand::Int(100)])
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)])
                .assign_new("$r2", "android.widget.Button")
                .call(Some("$r2"), SET_TEXT, vec![Operand::Str("Send".into())])
                .call(Some("$r2"), ON_CLICK, vec![Operand::Str("void onClick(android.view.View)".into())]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = assembler_with_layout();
        let stats = assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        assert_eq!(stats.instructions, 5);
        // Only the layout copy is new
        assert_eq!(stats.elements_created, 3);

        let result = assembler.finish();
        let roots = result.roots_of(&origin);
        assert_eq!(roots.len(), 1);
        let model = result.model();
        let screen = roots[0];
        assert_eq!(model.get(screen).id(), 10);

        let button = model.get_child(screen, 7).unwrap();
        assert_eq!(model.get(button).text(), "Send");
        assert!(model.get(button).listeners.contains("void onClick(android.view.View)"));
        assert_eq!(model.get(button).id_variable, "$r2");
        assert_eq!(result.elements_of(&origin).len(), 3);
        assert!(result.origins().apis_of(&origin).any(|api| api == FIND));
    }

    #[test]
    fn test_unknown_lookup_id_yields_placeholder() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Local("$i0".into())])
                .assign_new("$r2", "android.widget.EditText"),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let stats = assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        assert_eq!(stats.unknown_values, 1);

        let result = assembler.finish();
        let roots = result.roots_of(&origin);
        assert_eq!(roots.len(), 1);
        let element = result.model().get(roots[0]);
        assert_eq!(element.id(), -1);
        assert!(element.is_text());
    }

    #[test]
    fn test_same_site_merges_evidence() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)])
                .assign_new("$r2", "android.widget.Button")
                .call(Some("$r2"), ON_CLICK, vec![Operand::Local("$r9".into())]),
        );
        let click = InstrSite::new(method, 2);
        let first = ConstantOracle::new(&program).with_fact(
            click,
            ValueRef::Arg(0),
            [ConcreteValue::Str("void onClick(android.view.View)".into())],
        );
        let second = ConstantOracle::new(&program).with_fact(
            click,
            ValueRef::Arg(0),
            [ConcreteValue::Str("boolean onLongClick(android.view.View)".into())],
        );
        let main = main_activity();
        let other = Origin::activity("com.example.OtherActivity", "");

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let body = sites(&program, method);
        assembler.assemble_method(&program, &first, &body, &main).unwrap();
        assembler.assemble_method(&program, &second, &body, &other).unwrap();
        assert_eq!(assembler.model().len(), 1);

        let result = assembler.finish();
        let node = result.roots_of(&main)[0];
        assert_eq!(result.roots_of(&other), vec![node]);
        assert_eq!(result.model().get(node).listeners.len(), 2);
        assert_eq!(result.origins().origins_of(result.model().get(node).guid()).count(), 2);
    }

    #[test]
    fn test_add_view_skips_self_cycle() {
        init_logger();
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_new("$r1", "android.widget.LinearLayout")
                .assign_new("$r2", "android.widget.TextView")
                .call(Some("$r1"), ADD_VIEW, vec![Operand::Local("$r2".into())])
                .call(Some("$r1"), ADD_VIEW, vec![Operand::Local("$r1".into())])
                .call(Some("$r1"), ADD_VIEW, vec![Operand::Local("$r2".into())]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let stats = assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        assert_eq!(stats.self_cycles_skipped, 1);

        let result = assembler.finish();
        let roots = result.roots_of(&origin);
        assert_eq!(roots.len(), 1);
        let layout = roots[0];
        assert_eq!(result.model().get(layout).id(), -90000);
        assert_eq!(result.model().children(layout).len(), 1);
        let text = result.model().children(layout)[0];
        assert_eq!(result.model().get(text).id(), -90001);
    }

    #[test]
    fn test_malformed_method_is_skipped() {
        init_logger();
        let mut program = Program::new();
        let broken = program.add_method(
            MethodBody::new("void broken()")
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(7)])
                .other(None),
        );
        let fine = lookup_pair(&mut program);
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let stats = assembler.assemble(
            &program,
            &oracle,
            &[
                MethodUnit::new(sites(&program, broken), origin.clone()),
                MethodUnit::new(sites(&program, fine), origin.clone()),
            ],
        );
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].method, ON_CREATE);

        let result = assembler.finish();
        assert_eq!(result.skipped().len(), 1);
        let skipped = &result.skipped()[0];
        assert_eq!(skipped.context.method.as_deref(), Some("void broken()"));
        assert!(skipped.reason.contains("Malformed idiom"));
        assert_eq!(result.roots_of(&origin).len(), 1);
    }

    #[test]
    fn test_inflate_respects_attach_flag() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new("android.view.View onCreateView()")
                .assign_new("$r1", "android.widget.FrameLayout")
                .assign_call(
                    "$r2",
                    Some("$r0"),
                    INFLATE_3,
                    vec![Operand::Int(100), Operand::Local("$r1".into()), Operand::Int(0)],
                )
                .assign_call(
                    "$r3",
                    Some("$r0"),
                    INFLATE_3,
                    vec![Operand::Int(100), Operand::Local("$r1".into()), Operand::Int(1)],
                )
                .call(Some("$r2"), SET_TEXT, vec![Operand::Str("Header".into())]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = Origin::fragment("com.example.DetailFragment");

        let mut assembler = assembler_with_layout();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        let model = result.model();

        // Frame holding the attached copy, plus the detached copy
        let roots = result.roots_of(&origin);
        assert_eq!(roots.len(), 2);
        let frame = roots
            .iter()
            .copied()
            .find(|&n| model.get(n).view_class == "android.widget.FrameLayout")
            .unwrap();
        assert_eq!(model.children(frame).len(), 1);
        assert_eq!(model.all_children_flatten(frame).len(), 4);
        // Evidence reaches only the copy bound to the local
        let detached = roots.iter().copied().find(|&n| n != frame).unwrap();
        let attached = model.children(frame)[0];
        assert_eq!(model.get(detached).id(), 10);
        assert_eq!(model.get(detached).text(), "Header");
        assert!(model.get(attached).text().is_empty());
        assert_ne!(model.get(attached).guid(), model.get(detached).guid());
    }

    #[test]
    fn test_merge_layout_children_go_to_parent() {
        let mut assembler: TreeAssembler<InstrSite> = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let model = assembler.model_mut();
        let a = model.create_view(21, "android.widget.ImageView");
        let b = model.create_text(22, "android.widget.TextView");
        assembler.register_layout(200, LayoutTemplate::Merge(vec![a, b])).unwrap();

        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new("void init()")
                .assign_new("$r1", "android.widget.LinearLayout")
                .assign_call(
                    "$r2",
                    Some("$r0"),
                    "android.view.View inflate(int,android.view.ViewGroup)",
                    vec![Operand::Int(200), Operand::Local("$r1".into())],
                ),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();

        let result = assembler.finish();
        let roots = result.roots_of(&origin);
        assert_eq!(roots.len(), 1);
        let ids: Vec<i32> = result
            .model()
            .children(roots[0])
            .iter()
            .map(|&n| result.model().get(n).id())
            .collect();
        assert_eq!(ids, vec![21, 22]);
    }

    #[test]
    fn test_get_child_at_binds_children() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .call(Some("r0"), SET_CONTENT, vec![Operand::Int(100)])
                .assign_call("$r1", Some("r0"), FIND, vec![Operand::Int(10)])
                .assign_new("$r2", "android.widget.LinearLayout")
                .assign_call("$r3", Some("$r2"), CHILD_AT, vec![Operand::Int(0)])
                .assign_new("$r4", "android.widget.TextView")
                .call(Some("$r4"), "void setInputType(int)", vec![Operand::Int(0x21)]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = assembler_with_layout();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        let model = result.model();
        let screen = result.roots_of(&origin)[0];

        for &child in model.children(screen) {
            assert_eq!(model.get(child).input_types(), vec!["email"]);
        }
    }

    #[test]
    fn test_list_view_and_adapter_rows() {
        let mut program = Program::new();
        let list = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_call("$r1", Some("r0"), "android.widget.ListView getListView()", vec![]),
        );
        let adapter = program.add_method(
            MethodBody::new("android.view.View getView(int,android.view.View,android.view.ViewGroup)")
                .assign_new("$r5", "android.widget.ListView")
                .assign_call(
                    "$r6",
                    Some("$r4"),
                    "android.view.View getView(int,android.view.View,android.view.ViewGroup)",
                    vec![Operand::Int(0), Operand::Null, Operand::Local("$r5".into())],
                ),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, list), &origin)
            .unwrap();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, adapter), &origin)
            .unwrap();
        let result = assembler.finish();
        let model = result.model();
        let roots = result.roots_of(&origin);
        assert_eq!(roots.len(), 2);

        let with_row = roots.iter().copied().find(|&n| model.has_children(n)).unwrap();
        let row = model.children(with_row)[0];
        assert_eq!(model.get(row).view_class, "android.view.View");
        assert!(roots
            .iter()
            .all(|&n| model.get(n).view_class == "android.widget.ListView"));
    }

    #[test]
    fn test_ignored_widgets_take_no_evidence() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_new("$r1", "android.widget.ProgressBar")
                .call(Some("$r1"), ON_CLICK, vec![Operand::Str("void onClick(android.view.View)".into())]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        let node = result.roots_of(&origin)[0];
        assert!(result.model().get(node).listeners.is_empty());
    }

    #[test]
    fn test_image_setters_number_attributes() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_new("$r1", "android.widget.ImageView")
                .call(Some("$r1"), "void setImageResource(int)", vec![Operand::Int(0x7f020001)])
                .call(Some("$r1"), "void setImageResource(int)", vec![Operand::Int(0x7f020002)])
                .call(Some("$r1"), "void setImageResource(int)", vec![Operand::Int(0x7f020001)]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        let element = result.model().get(result.roots_of(&origin)[0]);
        assert_eq!(element.other_attributes.len(), 2);
        assert_eq!(element.other_attributes["image0"].value, (0x7f020001).to_string());
        assert_eq!(element.other_attributes["image1"].value, (0x7f020002).to_string());
    }

    #[test]
    fn test_menu_inflation_is_typed() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new("boolean onCreateOptionsMenu(android.view.Menu)").call(
                Some("$r2"),
                "void inflate(int,android.view.Menu)",
                vec![Operand::Int(300), Operand::Local("$r1".into())],
            ),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let allocator = assembler.model().allocator();
        let template = Menu::new(vec![MenuItem::new(
            allocator,
            31,
            Attr::new("title", "Settings", "@string/settings"),
            0,
            None,
            Vec::new(),
        )]);
        let template_guid = template.items[0].guid();
        assembler.register_menu(300, template);
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();

        let result = assembler.finish();
        let menus: Vec<&Menu> = result.menus_of(&origin).collect();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].menu_type, MenuType::Options);
        assert_eq!(
            menus[0].listener.as_deref(),
            Some("boolean onOptionsItemSelected(android.view.MenuItem)")
        );
        assert_eq!(menus[0].items[0].id(), 31);
        assert_ne!(menus[0].items[0].guid(), template_guid);
    }

    #[test]
    fn test_dialog_builder_chain() {
        let builder = "android.app.AlertDialog$Builder";
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new("void confirm()")
                .assign_new("$r1", builder)
                .assign_call(
                    "$r2",
                    Some("$r1"),
                    "android.app.AlertDialog$Builder setTitle(java.lang.CharSequence)",
                    vec![Operand::Str("Delete?".into())],
                )
                .assign_call(
                    "$r3",
                    Some("$r2"),
                    "android.app.AlertDialog$Builder setPositiveButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
                    vec![Operand::Str("Yes".into()), Operand::Str("void onClick(android.content.DialogInterface,int)".into())],
                )
                .call(
                    Some("$r3"),
                    "android.app.AlertDialog$Builder setNegativeButton(int,android.content.DialogInterface$OnClickListener)",
                    vec![Operand::Int(17039360), Operand::Null],
                ),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let stats = assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        // Listener of the negative button
        assert_eq!(stats.unknown_values, 1);

        let result = assembler.finish();
        let dialogs: Vec<_> = result.dialogs_of(&origin).collect();
        assert_eq!(dialogs.len(), 1);
        let dialog = dialogs[0];
        assert!(dialog.title.contains("Delete?"));
        assert_eq!(dialog.buttons.len(), 2);
        assert_eq!(dialog.buttons[0].button_type, ButtonType::Positive);
        assert!(dialog.buttons[0].label.contains("Yes"));
        assert_eq!(dialog.buttons[0].listeners.len(), 1);
        assert_eq!(dialog.buttons[1].button_type, ButtonType::Negative);
        assert!(dialog.buttons[1].label.contains("17039360"));
        assert!(result.model().is_empty());
    }

    #[test]
    fn test_fragment_transaction_fills_container() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .call(Some("r0"), SET_CONTENT, vec![Operand::Int(100)])
                .call(
                    Some("$r5"),
                    "android.app.FragmentTransaction replace(int,android.app.Fragment,java.lang.String)",
                    vec![Operand::Int(10), Operand::Local("$r6".into()), Operand::Str("detail".into())],
                ),
        );
        let transaction = InstrSite::new(method, 1);
        let oracle = ConstantOracle::new(&program).with_fact(
            transaction,
            ValueRef::Arg(1),
            [ConcreteValue::Str("com.example.DetailFragment".into())],
        );
        let origin = main_activity();

        let mut assembler = assembler_with_layout();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        let model = result.model();
        let screen = result.roots_of(&origin)[0];

        let slot = *model.children(screen).last().unwrap();
        let element = model.get(slot);
        assert_eq!(element.view_class, "com.example.DetailFragment");
        assert_eq!(element.tag(), Some("detail"));
        assert!(matches!(element.kind(), ViewKind::Fragment { .. }));
        assert_eq!(result.roots_of(&origin).len(), 1);
    }

    #[test]
    fn test_null_assignment_unbinds_local() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new(ON_CREATE)
                .assign_new("$r1", "android.widget.Button")
                .assign_null("$r1")
                .call(Some("$r1"), SET_TEXT, vec![Operand::Str("lost".into())]),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        assert!(result.model().get(result.roots_of(&origin)[0]).text().is_empty());
    }

    #[test]
    fn test_api_tracking_can_be_disabled() {
        let mut program = Program::new();
        let method = lookup_pair(&mut program);
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();
        let config = AssemblerConfig {
            track_api_calls: false,
            ..AssemblerConfig::default()
        };

        let mut assembler = TreeAssembler::new(config).unwrap();
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();
        let result = assembler.finish();
        assert_eq!(result.origins().api_count(), 0);
        assert_eq!(result.origins().element_count(), 1);
    }

    #[test]
    fn test_assembler_rejects_non_negative_dynamic_ids() {
        let config = AssemblerConfig {
            dynamic_id_start: 5,
            ..AssemblerConfig::default()
        };
        let result: crate::errors::ReconstructionResult<TreeAssembler<InstrSite>> = TreeAssembler::new(config);
        assert!(matches!(result, Err(ReconstructionError::Config(_))));
    }

    #[test]
    fn test_register_layout_rejects_foreign_nodes() {
        let mut foreign = crate::models::UiModel::new();
        foreign.create_view(1, "android.widget.TextView");
        let stray = foreign.create_group(2, "android.widget.LinearLayout");

        let mut assembler: TreeAssembler<InstrSite> = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let own = assembler.model_mut().create_view(3, "android.widget.TextView");

        let err = assembler
            .register_layout(100, LayoutTemplate::Merge(vec![own, stray]))
            .unwrap_err();
        assert!(matches!(err, ReconstructionError::UnknownNode { index: 1, len: 1 }));
        assert!(assembler.register_layout(100, LayoutTemplate::View(own)).is_ok());
    }

    #[test]
    fn test_menu_from_foreign_allocator_gets_model_guids() {
        let mut program = Program::new();
        let method = program.add_method(
            MethodBody::new("boolean onCreateOptionsMenu(android.view.Menu)").call(
                Some("$r2"),
                "void inflate(int,android.view.Menu)",
                vec![Operand::Int(300), Operand::Local("$r1".into())],
            ),
        );
        let oracle = ConstantOracle::new(&program);
        let origin = main_activity();

        let mut assembler = TreeAssembler::new(AssemblerConfig::default()).unwrap();
        let widget = assembler.model_mut().create_view(1, "android.widget.TextView");
        let widget_guid = assembler.model().get(widget).guid();

        // Same starting guid as the model's first widget
        let foreign = crate::models::IdentityAllocator::new();
        let template = Menu::new(vec![MenuItem::new(
            &foreign,
            31,
            Attr::new("title", "Settings", "@string/settings"),
            0,
            None,
            Vec::new(),
        )]);
        assert_eq!(template.items[0].guid(), widget_guid);
        assembler.register_menu(300, template);
        assembler
            .assemble_method(&program, &oracle, &sites(&program, method), &origin)
            .unwrap();

        let result = assembler.finish();
        let menus: Vec<&Menu> = result.menus_of(&origin).collect();
        let item_guid = menus[0].items[0].guid();
        assert!(result.model().nodes().all(|(_, e)| e.guid() != item_guid));
        assert_eq!(result.model().find_by_guid(item_guid), None);
    }
}
