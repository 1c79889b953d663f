// ps-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (f64). Constructors take CGS values.
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn dyn_cm2(v: f64) -> Pressure {
    use uom::si::pressure::dyne_per_square_centimeter;
    Pressure::new::<dyne_per_square_centimeter>(v)
}

#[inline]
pub fn g_cm3(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

#[inline]
pub fn cm_s(v: f64) -> Velocity {
    use uom::si::velocity::centimeter_per_second;
    Velocity::new::<centimeter_per_second>(v)
}
