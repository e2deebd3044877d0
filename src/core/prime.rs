/// Trial division up to the square root; 0 and 1 are not prime.
///
/// Composites with a small factor return almost immediately. A prime id costs
/// about √n / 2 divisions: microseconds for ids up to 10^12, but around a
/// second near 10^18 and longer towards `i64::MAX`. Customer ids are expected
/// to stay far below that.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3u64;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
