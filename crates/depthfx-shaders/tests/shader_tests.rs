use depthfx_core::{
    BlurParameters, EffectKind, KernelMapping, ShaderError, ShaderStage, TapStaging, MAX_RADIUS,
};
use depthfx_shaders::mock::{MockCompiler, MockProgram};
use depthfx_shaders::registry::Template;
use depthfx_shaders::{build_program, generate, generate_by_id, REGISTRY};

// ── Helpers ──────────────────────────────────────────────────────

const TOLERANCE: f64 = 1e-9;

const BLUR_KINDS: [EffectKind; 4] = [
    EffectKind::FastBlur,
    EffectKind::Blur,
    EffectKind::DepthBlur,
    EffectKind::VarDepthBlur,
];

/// Pull the weight out of every `+= texture(tex0 ...)*w` statement, in order.
fn tap_weights(fragment: &str) -> Vec<f64> {
    fragment
        .lines()
        .map(str::trim)
        .filter(|l| (l.starts_with("fragColor +=") || l.starts_with("color +=")) && l.contains("texture(tex0"))
        .map(|l| {
            let after = &l[l.rfind('*').expect("weighted tap") + 1..];
            let end = after.find(|ch: char| ch == ',' || ch == ';').expect("terminated tap");
            after[..end].trim().parse::<f64>().expect("float weight")
        })
        .collect()
}

fn declares_uniform(text: &str, name: &str) -> bool {
    let suffix = format!(" {name};");
    text.lines()
        .map(str::trim)
        .any(|l| l.starts_with("uniform ") && l.ends_with(&suffix))
}

// ── 1. Registry ──────────────────────────────────────────────────

#[test]
fn registry_covers_every_kind() {
    assert_eq!(REGISTRY.len(), 23);
    for kind in EffectKind::ALL {
        assert!(REGISTRY.iter().any(|e| e.kind == kind), "{kind} missing");
    }
}

#[test]
fn registry_names_are_non_empty() {
    for entry in REGISTRY.iter() {
        assert!(!entry.name.is_empty(), "effect '{}' has empty name", entry.id());
    }
}

#[test]
fn every_bound_name_is_declared() {
    for entry in REGISTRY.iter() {
        let blur = entry.kind.is_blur().then(|| BlurParameters::new(2, 0.5));
        let shader = generate(entry.kind, blur).unwrap();
        let text = format!("{}\n{}", shader.source.vertex, shader.source.fragment);
        for name in entry.samplers.iter().chain(entry.uniforms.iter()) {
            assert!(declares_uniform(&text, name), "{}: '{name}' not declared", entry.id());
        }
    }
}

#[test]
fn screen_multiple_binds_five_textures() {
    let entry = depthfx_shaders::entry(EffectKind::ScreenMultiple).unwrap();
    assert_eq!(entry.samplers, &["tex0", "tex1", "tex2", "tex3", "tex4"]);
    if let Template::Fixed { fragment, .. } = entry.template {
        assert!(fragment.contains("1.0 - (1.0 - col0) * (1.0 - col1) * (1.0 - col2) * (1.0 - col3) * (1.0 - col4)"));
        for bit in 1..=4 {
            assert!(fragment.contains(&format!("mask & (1 << {bit})")));
        }
    } else {
        panic!("screen multiple should be a fixed template");
    }
}

// ── 2. Fixed templates ───────────────────────────────────────────

#[test]
fn fixed_effects_are_complete_programs() {
    for entry in REGISTRY.iter().filter(|e| !e.kind.is_blur()) {
        let shader = generate(entry.kind, None).unwrap();
        assert!(shader.kernel.is_none());
        assert!(shader.source.vertex.starts_with("#version 150\n"));
        assert!(shader.source.fragment.starts_with("#version 150\n"));
        assert!(shader.source.vertex.contains("void main()"), "{}", entry.id());
        assert!(shader.source.fragment.contains("void main(void)"), "{}", entry.id());
    }
}

#[test]
fn fixed_effects_are_stable_across_calls() {
    for entry in REGISTRY.iter().filter(|e| !e.kind.is_blur()) {
        assert_eq!(generate(entry.kind, None).unwrap(), generate(entry.kind, None).unwrap());
    }
}

#[test]
fn strobe_enables_explicit_locations() {
    let shader = generate(EffectKind::Strobe, None).unwrap();
    assert!(shader
        .source
        .fragment
        .starts_with("#version 150\n#extension GL_ARB_explicit_attrib_location : enable\n"));
    assert!(shader.source.fragment.contains("layout (location = 0) out float fragHue;"));
}

#[test]
fn cloud_has_its_own_vertex_stage() {
    let shader = generate(EffectKind::CloudDepth, None).unwrap();
    assert!(shader.source.vertex.contains("out float depth;"));
    assert!(shader.source.fragment.contains("in float depth;"));
    assert!(!shader.source.vertex.contains("texcoord"));
}

#[test]
fn inverse_mask_flips_alpha() {
    let mask = generate(EffectKind::Mask, None).unwrap();
    let inverse = generate(EffectKind::InverseMask, None).unwrap();
    assert!(inverse.source.fragment.contains("1.0 - texture(maskTex, texCoordVarying).r"));
    assert!(!mask.source.fragment.contains("1.0 - texture(maskTex"));
}

// ── 3. Separable blurs ───────────────────────────────────────────

#[test]
fn blur_emits_one_term_per_tap() {
    for kind in BLUR_KINDS {
        for radius in 1..=8 {
            let shader = generate(kind, Some(BlurParameters::new(radius, 0.3))).unwrap();
            let kernel = shader.kernel.expect("blur carries its kernel");
            let weights = tap_weights(&shader.source.fragment);
            assert_eq!(weights.len(), (2 * radius + 1) as usize, "{kind} r={radius}");
            for (w, c) in weights.iter().zip(kernel.taps()) {
                assert!((w - c).abs() <= TOLERANCE * c.abs().max(1.0), "{kind} r={radius}");
            }
        }
    }
}

#[test]
fn blur_respects_staging_override() {
    for kind in BLUR_KINDS {
        for staging in [TapStaging::Vertex, TapStaging::Fragment] {
            let params = BlurParameters::new(3, 0.5).with_staging(staging);
            let shader = generate(kind, Some(params)).unwrap();
            let has_array = shader.source.vertex.contains("out vec2 texCoordVarying[7];");
            assert_eq!(has_array, staging == TapStaging::Vertex, "{kind} {staging:?}");
            assert_eq!(tap_weights(&shader.source.fragment).len(), 7);
        }
    }
}

#[test]
fn default_mappings_follow_registry() {
    let fast = generate(EffectKind::FastBlur, Some(BlurParameters::new(3, 1.0))).unwrap();
    let depth = generate(EffectKind::DepthBlur, Some(BlurParameters::new(3, 1.0))).unwrap();
    let var = generate(EffectKind::VarDepthBlur, Some(BlurParameters::new(3, 1.0))).unwrap();
    assert_eq!(fast.kernel.unwrap().mapping(), KernelMapping::OffByOne);
    assert_eq!(depth.kernel.unwrap().mapping(), KernelMapping::Centered);
    assert_eq!(var.kernel.unwrap().mapping(), KernelMapping::OffByOne);
}

#[test]
fn fast_blur_five_taps_centered() {
    let params = BlurParameters::new(2, 1.0).with_mapping(KernelMapping::Centered);
    let shader = generate(EffectKind::FastBlur, Some(params)).unwrap();
    let kernel = shader.kernel.unwrap();
    let c = kernel.taps();

    assert_eq!(c.len(), 5);
    assert!((kernel.sum() - 1.0).abs() < TOLERANCE);
    assert!((c[0] - c[4]).abs() < TOLERANCE);
    assert!(c.iter().all(|&v| v <= c[2]));
    assert_eq!(shader.source.fragment.matches("fragColor += texture(").count(), 5);
}

#[test]
fn fast_blur_default_mapping_is_skewed() {
    let shader = generate(EffectKind::FastBlur, Some(BlurParameters::new(2, 1.0))).unwrap();
    let kernel = shader.kernel.unwrap();
    let c = kernel.taps();
    assert_eq!(c.len(), 5);
    assert!((kernel.sum() - 1.0).abs() < TOLERANCE);
    assert!((c[0] - c[4]).abs() > 1e-3);
}

#[test]
fn var_depth_blur_gates_every_tap() {
    let shader = generate(EffectKind::VarDepthBlur, Some(BlurParameters::new(4, 0.2))).unwrap();
    let frag = &shader.source.fragment;
    assert!(frag.contains("float dist = 1.0 - texture(depthTex, texCoordVarying).r;"));
    assert!(frag.contains("step(offset, dist)"));
    assert!(!frag.contains("smoothstep"));
    assert_eq!(frag.matches("dir*factor)*").count(), 9);
}

// ── 4. Error handling ────────────────────────────────────────────

#[test]
fn invalid_blur_parameters_rejected() {
    for kind in BLUR_KINDS {
        for params in [
            BlurParameters::new(-1, 1.0),
            BlurParameters::new(0, 1.0),
            BlurParameters::new(3, 0.0),
            BlurParameters::new(3, -0.5),
        ] {
            assert!(
                matches!(generate(kind, Some(params)), Err(ShaderError::InvalidParameter(_))),
                "{kind} accepted {params:?}"
            );
        }
    }
}

#[test]
fn vanishing_kernel_never_emits_source() {
    let result = generate(EffectKind::FastBlur, Some(BlurParameters::new(2, 1e-4)));
    assert!(matches!(result, Err(ShaderError::InvalidParameter(_))));

    let compiler = MockCompiler::new();
    let result = build_program(&compiler, EffectKind::Blur, Some(BlurParameters::new(2, f64::MAX)));
    assert!(matches!(result, Err(ShaderError::InvalidParameter(_))));
    assert_eq!(compiler.compile_count(), 0);
}

#[test]
fn oversized_radius_rejected() {
    for radius in [MAX_RADIUS + 1, i32::MAX] {
        let result = generate(EffectKind::DepthBlur, Some(BlurParameters::new(radius, 1.0)));
        assert!(matches!(result, Err(ShaderError::InvalidParameter(_))), "r={radius}");
    }
}

#[test]
fn unknown_effect_rejected() {
    assert!(matches!(
        generate_by_id("vignette", None),
        Err(ShaderError::UnsupportedEffect(_))
    ));
}

#[test]
fn generate_by_id_matches_generate() {
    let params = Some(BlurParameters::new(2, 0.5));
    assert_eq!(
        generate_by_id("depthBlur", params).unwrap(),
        generate(EffectKind::DepthBlur, params).unwrap()
    );
}

// ── 5. Compilation hand-off ──────────────────────────────────────

#[test]
fn build_program_hands_source_to_compiler() {
    let compiler = MockCompiler::new();
    let program = build_program(&compiler, EffectKind::Halftone, None).unwrap();
    assert_eq!(program, MockProgram(0));
    let compiled = compiler.compiled.lock().unwrap();
    assert_eq!(compiled[0], generate(EffectKind::Halftone, None).unwrap().source);
}

#[test]
fn mock_compiler_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MockCompiler>();
}

#[test]
fn compile_error_surfaces_verbatim() {
    let err = ShaderError::CompileError {
        stage: ShaderStage::Fragment,
        log: "0:12(5): error: `factor' undeclared".to_string(),
    };
    let compiler = MockCompiler::failing(err.clone());
    let result = build_program(&compiler, EffectKind::VarDepthBlur, Some(BlurParameters::new(2, 0.5)));
    assert_eq!(result, Err(err));
}

#[test]
fn link_error_surfaces_verbatim() {
    let err = ShaderError::LinkError { log: "varying mismatch".to_string() };
    let compiler = MockCompiler::failing(err.clone());
    assert_eq!(build_program(&compiler, EffectKind::Screen, None), Err(err));
}

#[test]
fn failed_generation_never_reaches_compiler() {
    let compiler = MockCompiler::new();
    let result = build_program(&compiler, EffectKind::Blur, Some(BlurParameters::new(0, 1.0)));
    assert!(matches!(result, Err(ShaderError::InvalidParameter(_))));
    assert_eq!(compiler.compile_count(), 0);
}
