fn main() {
    // ESP-IDF sysenv is only meaningful for firmware builds; host builds of
    // the library and its tests skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
