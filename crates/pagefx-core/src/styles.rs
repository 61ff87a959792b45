#![forbid(unsafe_code)]

//! Stylesheets injected at startup.

const PARTICLE_CSS: &str = r#"
    .hero-particles {
        position: absolute;
        top: 0;
        left: 0;
        width: 100%;
        height: 100%;
        overflow: hidden;
        pointer-events: none;
    }

    .particle {
        position: absolute;
        background: rgba(45, 122, 62, 0.6);
        border-radius: 50%;
        animation: float-particle infinite ease-in-out;
        opacity: 0;
    }

    @keyframes float-particle {
        0%, 100% {
            opacity: 0;
            transform: translateY(0) translateX(0);
        }
        50% {
            opacity: 1;
        }
        100% {
            transform: translateY(-100vh) translateX(__DRIFT__px);
        }
    }
"#;

const HAMBURGER_CSS: &str = r#"
    .hamburger {
        display: none;
        flex-direction: column;
        gap: 5px;
        background: none;
        border: none;
        cursor: pointer;
        padding: 10px;
    }

    .hamburger span {
        width: 25px;
        height: 3px;
        background: var(--text-primary);
        transition: all 0.3s ease;
    }

    .hamburger.active span:nth-child(1) {
        transform: rotate(45deg) translate(8px, 8px);
    }

    .hamburger.active span:nth-child(2) {
        opacity: 0;
    }

    .hamburger.active span:nth-child(3) {
        transform: rotate(-45deg) translate(7px, -7px);
    }

    @media (max-width: __BREAKPOINT__px) {
        .hamburger {
            display: flex;
        }

        .nav-menu {
            display: flex;
            position: fixed;
            top: 70px;
            right: -100%;
            flex-direction: column;
            background: rgba(13, 17, 23, 0.98);
            backdrop-filter: blur(10px);
            width: 100%;
            padding: 30px;
            border-top: 2px solid var(--primary-red);
            transition: right 0.3s ease;
            box-shadow: 0 5px 20px rgba(0, 0, 0, 0.5);
        }

        .nav-menu.active {
            right: 0;
        }

        .nav-menu li {
            margin: 10px 0;
        }

        .nav-menu a {
            font-size: 1.3rem;
        }
    }
"#;

/// Particle container, particle look and the `float-particle` keyframes.
///
/// `drift_px` is the horizontal drift at the top of the float, shared by all
/// particles using this stylesheet.
#[must_use]
pub fn particle_stylesheet(drift_px: f64) -> String {
    PARTICLE_CSS.replace("__DRIFT__", &drift_px.to_string())
}

/// Hamburger bars and the off-canvas menu below `breakpoint_px`.
#[must_use]
pub fn hamburger_stylesheet(breakpoint_px: u32) -> String {
    HAMBURGER_CSS.replace("__BREAKPOINT__", &breakpoint_px.to_string())
}
