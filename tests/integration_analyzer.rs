use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use symxref::core::{
    AnalysisConfig, AnalysisError, AnalysisReport, CrossReferenceEdge, OriginEntry,
    ProjectAnalyzer, SymbolKind,
};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn analyze(root: &Path) -> AnalysisReport {
    ProjectAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .analyze(root)
        .unwrap()
}

fn edge(symbol: &str, kind: SymbolKind, used_in: &str, defined_in: &str) -> CrossReferenceEdge {
    CrossReferenceEdge {
        symbol: symbol.to_string(),
        symbol_kind: kind,
        used_in: used_in.to_string(),
        defined_in: defined_in.to_string(),
    }
}

fn edges_for<'a>(report: &'a AnalysisReport, symbol: &str) -> Vec<&'a CrossReferenceEdge> {
    report
        .cross_reference
        .iter()
        .filter(|e| e.symbol == symbol)
        .collect()
}

fn sorted(mut edges: Vec<CrossReferenceEdge>) -> Vec<CrossReferenceEdge> {
    edges.sort();
    edges
}

#[test]
fn function_defined_in_one_file_called_in_another() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "def greet():\n    return 'hi'\n");
    write(dir.path(), "b.py", "greet()\n");

    let report = analyze(dir.path());

    assert_eq!(
        report.origin_map["greet"],
        vec![OriginEntry::new("a.py", SymbolKind::Function)]
    );
    let callers: Vec<_> = report.usage_map["greet"].iter().map(String::as_str).collect();
    assert_eq!(callers, vec!["b.py"]);
    assert_eq!(
        report.cross_reference,
        vec![edge("greet", SymbolKind::Function, "b.py", "a.py")]
    );
}

#[test]
fn method_call_resolves_by_attribute_name_only() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        dir.path(),
        "a.py",
        "class Foo:\n    def bar(self):\n        return 1\n",
    );
    write(dir.path(), "b.py", "def use(obj):\n    return obj.bar()\n");

    let report = analyze(dir.path());

    assert!(report
        .cross_reference
        .contains(&edge("bar", SymbolKind::Method, "b.py", "a.py")));
}

#[test]
fn same_name_defined_twice_yields_one_edge_per_origin() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "def helper():\n    pass\n");
    write(dir.path(), "c.py", "def helper():\n    pass\n");
    write(dir.path(), "b.py", "helper()\n");

    let report = analyze(dir.path());

    let helper: Vec<_> = edges_for(&report, "helper").into_iter().cloned().collect();
    assert_eq!(
        sorted(helper),
        vec![
            edge("helper", SymbolKind::Function, "b.py", "a.py"),
            edge("helper", SymbolKind::Function, "b.py", "c.py"),
        ]
    );
}

#[test]
fn calls_inside_the_defining_file_produce_no_edges() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        dir.path(),
        "a.py",
        "def local_only():\n    pass\n\nlocal_only()\n",
    );
    write(dir.path(), "b.py", "print('unrelated')\n");

    let report = analyze(dir.path());

    assert!(report.origin_map.contains_key("local_only"));
    assert!(report.usage_map.contains_key("local_only"));
    assert!(edges_for(&report, "local_only").is_empty());
}

#[test]
fn syntax_error_file_is_dropped_without_aborting_the_run() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "def greet():\n    pass\n");
    write(dir.path(), "broken.py", "def oops(:\n    greet()\n    unique_call()\n");
    write(dir.path(), "b.py", "greet()\n");

    let report = analyze(dir.path());

    assert!(!report.reference_map.contains_key("broken.py"));
    assert!(!report.combined.contains_key("broken.py"));
    assert!(!report.usage_map.contains_key("unique_call"));
    assert!(report
        .usage_map
        .values()
        .all(|files| !files.contains("broken.py")));
    assert_eq!(
        report.cross_reference,
        vec![edge("greet", SymbolKind::Function, "b.py", "a.py")]
    );
    // Still listed in the inventory with its text.
    assert!(report.inventory["broken.py"].content.is_some());
}

#[test]
fn vendored_python2_module_adds_no_definitions_or_calls() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "def greet():\n    pass\n");
    write(
        dir.path(),
        "vendor/legacy.py",
        "def helper():\n    print \"legacy\"\n    greet()\n",
    );
    write(dir.path(), "b.py", "helper()\n");

    let report = analyze(dir.path());

    assert!(!report.reference_map.contains_key("vendor/legacy.py"));
    assert!(!report.origin_map.contains_key("helper"));
    assert!(!report.usage_map.contains_key("greet"));
    assert!(report.cross_reference.is_empty());
}

#[cfg(unix)]
#[test]
fn symlinked_module_is_analyzed_under_its_link_path() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "real_a.py", "def greet():\n    pass\n");
    std::os::unix::fs::symlink(dir.path().join("real_a.py"), dir.path().join("link.py")).unwrap();
    write(dir.path(), "b.py", "greet()\n");

    let report = analyze(dir.path());

    let files: Vec<_> = report.reference_map.keys().map(String::as_str).collect();
    assert_eq!(files, vec!["b.py", "link.py", "real_a.py"]);
    assert_eq!(
        sorted(report.cross_reference),
        vec![
            edge("greet", SymbolKind::Function, "b.py", "link.py"),
            edge("greet", SymbolKind::Function, "b.py", "real_a.py"),
        ]
    );
}

#[test]
fn undefined_names_produce_no_edges() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "import json\njson.dumps({})\nprint(len([]))\n");

    let report = analyze(dir.path());

    assert!(report.usage_map.contains_key("dumps"));
    assert!(report.cross_reference.is_empty());
}

#[test]
fn edges_never_point_back_to_the_calling_file() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        dir.path(),
        "pkg/models.py",
        "class Run:\n    def run(self):\n        self.run()\n\ndef run():\n    Run().run()\n",
    );
    write(dir.path(), "pkg/jobs.py", "class Job:\n    def run(self):\n        pass\n\nrun()\n");
    write(dir.path(), "main.py", "from pkg.models import Run\nRun().run()\n");

    let report = analyze(dir.path());

    assert!(!report.cross_reference.is_empty());
    assert!(report
        .cross_reference
        .iter()
        .all(|e| e.used_in != e.defined_in));
    // main.py -> run is defined as a function and method in models, a method in jobs.
    let from_main: BTreeSet<_> = report
        .cross_reference
        .iter()
        .filter(|e| e.used_in == "main.py" && e.symbol == "run")
        .map(|e| (e.defined_in.as_str(), e.symbol_kind))
        .collect();
    assert_eq!(
        from_main,
        BTreeSet::from([
            ("pkg/jobs.py", SymbolKind::Method),
            ("pkg/models.py", SymbolKind::Function),
            ("pkg/models.py", SymbolKind::Method),
        ])
    );
}

#[test]
fn every_edge_path_was_enumerated() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "lib/util.py", "def fmt():\n    pass\n");
    write(dir.path(), "app/main.py", "fmt()\n");

    let report = analyze(dir.path());

    assert_eq!(
        report.cross_reference,
        vec![edge("fmt", SymbolKind::Function, "app/main.py", "lib/util.py")]
    );
    for e in &report.cross_reference {
        assert!(report.inventory.contains_key(&e.used_in));
        assert!(report.inventory.contains_key(&e.defined_in));
    }
}

#[test]
fn running_twice_yields_the_same_edges() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "def a():\n    b()\n\nclass K:\n    def m(self):\n        a()\n");
    write(dir.path(), "b.py", "def b():\n    a()\n    K().m()\n");
    write(dir.path(), "c.py", "x = 1\nb()\na()\n");

    let first = analyze(dir.path());
    let second = analyze(dir.path());

    assert_eq!(
        sorted(first.cross_reference),
        sorted(second.cross_reference)
    );
    assert_eq!(first.usage_map, second.usage_map);
    assert_eq!(first.origin_map, second.origin_map);
}

#[test]
fn sequential_and_parallel_runs_agree() {
    let dir = tempfile::TempDir::new().unwrap();
    for i in 0..8 {
        write(
            dir.path(),
            &format!("mod_{i}.py"),
            &format!("def f{i}():\n    f{}()\n", (i + 1) % 8),
        );
    }

    let parallel = analyze(dir.path());
    let sequential = ProjectAnalyzer::new(AnalysisConfig::default().with_parallel(false))
        .unwrap()
        .analyze(dir.path())
        .unwrap();

    assert_eq!(parallel.cross_reference.len(), 8);
    assert_eq!(
        sorted(parallel.cross_reference),
        sorted(sequential.cross_reference)
    );
}

#[test]
fn adding_a_caller_adds_exactly_its_edges() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "a.py", "def foo():\n    pass\n");
    write(dir.path(), "c.py", "class C:\n    def foo(self):\n        pass\n");
    write(dir.path(), "d.py", "def other():\n    foo()\n");

    let before = sorted(analyze(dir.path()).cross_reference);

    write(dir.path(), "b.py", "foo()\n");
    let after = sorted(analyze(dir.path()).cross_reference);

    let mut expected = before.clone();
    expected.push(edge("foo", SymbolKind::Function, "b.py", "a.py"));
    expected.push(edge("foo", SymbolKind::Method, "b.py", "c.py"));
    assert_eq!(after, sorted(expected));
}

#[test]
fn missing_root_fails_the_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = ProjectAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .analyze(&dir.path().join("nope"))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::RootNotFound(_)));
}

#[test]
fn unsupported_language_is_rejected_up_front() {
    let result = ProjectAnalyzer::new(AnalysisConfig::for_language("fortran"));
    assert!(matches!(
        result,
        Err(AnalysisError::UnsupportedLanguage(ref lang)) if lang == "fortran"
    ));
}
