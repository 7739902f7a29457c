pub fn get() -> ! {
    unreachable!("private to the users routes")
}
