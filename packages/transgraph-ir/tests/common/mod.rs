//! Shared helpers for integration tests

#![allow(dead_code)]

use transgraph_ir::{BuildConfig, BuildOutput, GraphBuildPipeline};

pub fn build(sources: &[(&str, &str)]) -> BuildOutput {
    build_with(BuildConfig::default(), sources)
}

pub fn build_with(config: BuildConfig, sources: &[(&str, &str)]) -> BuildOutput {
    GraphBuildPipeline::new(config)
        .expect("valid config")
        .build_sources(sources)
        .expect("build succeeds")
}

/// Every remaining edge `u → v` has `v` scheduled before `u`
pub fn assert_order_contract(out: &BuildOutput) {
    for (from, to, kind) in out.graph.edges() {
        let u = out.schedule.position(from).expect("caller scheduled");
        let v = out.schedule.position(to).expect("callee scheduled");
        assert!(v < u, "{} edge {} -> {} violates order", kind, from, to);
    }
}

pub fn assert_no_self_loops(out: &BuildOutput) {
    for (from, to, _) in out.graph.edges() {
        assert_ne!(from, to, "self-loop on {}", from);
    }
}
