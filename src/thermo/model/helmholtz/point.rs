use super::{IdealPart, ResidualPart};

/// The equation of state evaluated at one density and temperature.
///
/// No phase splitting happens here: inside the two-phase region the values
/// describe the metastable (or unstable) homogeneous fluid.
///
/// All values are SI and mass based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelmholtzPoint {
    pub density: f64,
    pub temperature: f64,
    pub gas_constant: f64,
    pub ideal: IdealPart,
    pub residual: ResidualPart,
}

impl HelmholtzPoint {
    fn rt(&self) -> f64 {
        self.gas_constant * self.temperature
    }

    /// `p = ρ·R·T·(1 + δ·αʳ_δ)`
    #[must_use]
    pub fn pressure(&self) -> f64 {
        self.density * self.rt() * (1.0 + self.residual.delta_ddelta)
    }

    /// `(∂p/∂ρ)_T`
    #[must_use]
    pub fn dp_drho(&self) -> f64 {
        let r = &self.residual;
        self.rt() * (1.0 + 2.0 * r.delta_ddelta + r.delta2_ddelta2)
    }

    /// `(∂p/∂T)_ρ`
    #[must_use]
    pub fn dp_dt(&self) -> f64 {
        let r = &self.residual;
        self.density * self.gas_constant * (1.0 + r.delta_ddelta - r.delta_tau_ddelta_dtau)
    }

    #[must_use]
    pub fn internal_energy(&self) -> f64 {
        self.rt() * (self.ideal.tau_dtau + self.residual.tau_dtau)
    }

    #[must_use]
    pub fn enthalpy(&self) -> f64 {
        self.internal_energy() + self.pressure() / self.density
    }

    #[must_use]
    pub fn entropy(&self) -> f64 {
        let (i, r) = (&self.ideal, &self.residual);
        self.gas_constant * (i.tau_dtau + r.tau_dtau - i.alpha - r.alpha)
    }

    #[must_use]
    pub fn gibbs_energy(&self) -> f64 {
        self.enthalpy() - self.temperature * self.entropy()
    }

    #[must_use]
    pub fn cv(&self) -> f64 {
        -self.gas_constant * (self.ideal.tau2_dtau2 + self.residual.tau2_dtau2)
    }

    /// `cp = cv + T·(∂p/∂T)²/(ρ²·(∂p/∂ρ))`, unbounded at a spinodal.
    #[must_use]
    pub fn cp(&self) -> f64 {
        let dp_dt = self.dp_dt();
        self.cv() + self.temperature * dp_dt * dp_dt / (self.density.powi(2) * self.dp_drho())
    }

    /// Speed of sound, `NaN` where `(∂p/∂ρ)_s` is not positive.
    #[must_use]
    pub fn speed_of_sound(&self) -> f64 {
        let squared = self.cp() / self.cv() * self.dp_drho();
        if squared > 0.0 { squared.sqrt() } else { f64::NAN }
    }

    #[must_use]
    pub fn compressibility_factor(&self) -> f64 {
        1.0 + self.residual.delta_ddelta
    }

    /// `κ_T = 1/(ρ·(∂p/∂ρ)_T)`
    #[must_use]
    pub fn isothermal_compressibility(&self) -> f64 {
        1.0 / (self.density * self.dp_drho())
    }

    /// `β = (∂p/∂T)_ρ / (ρ·(∂p/∂ρ)_T)`
    #[must_use]
    pub fn isobaric_expansion_coefficient(&self) -> f64 {
        self.dp_dt() / (self.density * self.dp_drho())
    }

    /// `μ_JT = (T·β − 1)/(ρ·cp)`
    #[must_use]
    pub fn joule_thomson(&self) -> f64 {
        (self.temperature * self.isobaric_expansion_coefficient() - 1.0)
            / (self.density * self.cp())
    }

    /// `(∂h/∂ρ)_T`
    #[must_use]
    pub fn dh_drho(&self) -> f64 {
        let rho = self.density;
        (self.dp_drho() - self.temperature * self.dp_dt() / rho) / rho
    }

    /// `(∂h/∂T)_ρ`
    #[must_use]
    pub fn dh_dt(&self) -> f64 {
        self.cv() + self.dp_dt() / self.density
    }

    /// `(∂s/∂ρ)_T`
    #[must_use]
    pub fn ds_drho(&self) -> f64 {
        -self.dp_dt() / self.density.powi(2)
    }

    /// `(∂s/∂T)_ρ`
    #[must_use]
    pub fn ds_dt(&self) -> f64 {
        self.cv() / self.temperature
    }

    /// `(∂u/∂ρ)_T`
    #[must_use]
    pub fn du_drho(&self) -> f64 {
        (self.pressure() - self.temperature * self.dp_dt()) / self.density.powi(2)
    }

    /// `(∂u/∂T)_ρ`
    #[must_use]
    pub fn du_dt(&self) -> f64 {
        self.cv()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::HelmholtzPoint;
    use crate::thermo::{
        PropertyBackend,
        model::helmholtz::{HelmholtzModel, test_support::VanDerWaals},
    };

    #[test]
    fn pressure_matches_closed_form() {
        let vdw = VanDerWaals::new();
        for (rho, t) in [(50.0, 280.0), (700.0, 250.0), (300.0, 400.0)] {
            assert_relative_eq!(
                vdw.evaluate(rho, t).pressure(),
                vdw.pressure(rho, t),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn critical_point_is_an_inflection() {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let point = vdw.evaluate(c.rho_crit, c.t_crit);

        assert_relative_eq!(point.pressure(), c.p_crit, max_relative = 1e-12);
        assert!(point.dp_drho().abs() / (c.gas_constant * c.t_crit) < 1e-12);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let vdw = VanDerWaals::new();
        let (rho, t) = (400.0, 320.0);
        let point = vdw.evaluate(rho, t);

        let (d_rho, d_t) = (1e-4, 1e-5);
        let at = |rho, t| vdw.evaluate(rho, t);
        let central_rho = |f: fn(&HelmholtzPoint) -> f64| {
            (f(&at(rho + d_rho, t)) - f(&at(rho - d_rho, t))) / (2.0 * d_rho)
        };
        let central_t = |f: fn(&HelmholtzPoint) -> f64| {
            (f(&at(rho, t + d_t)) - f(&at(rho, t - d_t))) / (2.0 * d_t)
        };

        type P = HelmholtzPoint;
        assert_relative_eq!(point.dp_drho(), central_rho(P::pressure), max_relative = 1e-6);
        assert_relative_eq!(point.dp_dt(), central_t(P::pressure), max_relative = 1e-6);
        assert_relative_eq!(point.dh_drho(), central_rho(P::enthalpy), max_relative = 1e-6);
        assert_relative_eq!(point.dh_dt(), central_t(P::enthalpy), max_relative = 1e-6);
        assert_relative_eq!(point.ds_drho(), central_rho(P::entropy), max_relative = 1e-6);
        assert_relative_eq!(point.ds_dt(), central_t(P::entropy), max_relative = 1e-6);
        assert_relative_eq!(point.du_drho(), central_rho(P::internal_energy), max_relative = 1e-6);
        assert_relative_eq!(point.du_dt(), central_t(P::internal_energy), max_relative = 1e-6);
    }

    #[test]
    fn gibbs_relation() {
        // (∂g/∂p)_T = 1/ρ along an isotherm.
        let vdw = VanDerWaals::new();
        let t = 350.0;
        let (a, b) = (vdw.evaluate(100.0, t), vdw.evaluate(100.001, t));
        let slope = (b.gibbs_energy() - a.gibbs_energy()) / (b.pressure() - a.pressure());
        assert_relative_eq!(slope, 1.0 / 100.0005, max_relative = 1e-6);
    }
}
